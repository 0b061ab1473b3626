// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Discovery options.
//!
//! Options are plain values. Hosts build them directly or start from the
//! environment:
//! - `EXEMPLAR_DOCTEST_TESTS`: also scan test-looking modules (`1`, `true`, `yes`, `on`)
//! - `EXEMPLAR_DOCTEST_EXTENSION`: comma separated extensions for text-file discovery
//! - `EXEMPLAR_DOCTEST_FIXTURES`: suffix naming a text file's fixture module
//! - `EXEMPLAR_INCLUDE` / `EXEMPLAR_EXCLUDE`: comma separated name patterns
//! - `EXEMPLAR_TESTMATCH`: pattern for names that look like tests

use std::env;

/// Names matching this look like test modules.
pub const DEFAULT_TEST_MATCH: &str = r"(?:^|[\x08_./-])[Tt]est";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctestOptions {
    /// Also look for examples in modules whose names look like tests.
    pub doctest_tests: bool,
    /// Extensions of text files that may hold examples (`.txt`, `.rst`).
    pub extensions: Vec<String>,
    /// Fixture module suffix for text files.
    pub fixtures: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub test_match: String,
}

impl Default for DoctestOptions {
    fn default() -> Self {
        Self {
            doctest_tests: false,
            extensions: Vec::new(),
            fixtures: None,
            include: Vec::new(),
            exclude: Vec::new(),
            test_match: DEFAULT_TEST_MATCH.to_string(),
        }
    }
}

impl DoctestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with defaults taken from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Options with defaults taken from `lookup`, which maps a variable
    /// name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(value) = lookup("EXEMPLAR_DOCTEST_TESTS") {
            options.doctest_tests = is_truthy(&value);
        }
        if let Some(value) = lookup("EXEMPLAR_DOCTEST_EXTENSION") {
            options.extensions = to_list(&value);
        }
        options.fixtures = lookup("EXEMPLAR_DOCTEST_FIXTURES").filter(|s| !s.trim().is_empty());
        if let Some(value) = lookup("EXEMPLAR_INCLUDE") {
            options.include = to_list(&value);
        }
        if let Some(value) = lookup("EXEMPLAR_EXCLUDE") {
            options.exclude = to_list(&value);
        }
        if let Some(value) = lookup("EXEMPLAR_TESTMATCH").filter(|s| !s.is_empty()) {
            options.test_match = value;
        }
        options
    }

    pub fn with_doctest_tests(mut self, enabled: bool) -> Self {
        self.doctest_tests = enabled;
        self
    }

    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    pub fn with_fixtures(mut self, suffix: impl Into<String>) -> Self {
        self.fixtures = Some(suffix.into());
        self
    }

    pub fn with_include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub fn with_test_match(mut self, pattern: impl Into<String>) -> Self {
        self.test_match = pattern.into();
        self
    }
}

/// Split a comma separated setting, trimming each entry.
pub fn to_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
