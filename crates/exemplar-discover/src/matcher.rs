// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Which modules and files are scanned for examples.

use std::path::Path;

use regex::Regex;

use crate::error::DiscoveryError;
use crate::options::DoctestOptions;
use exemplar_source::SOURCE_EXT;

/// Compiled matching rules.
#[derive(Debug, Clone)]
pub struct MatchRule {
    doctest_tests: bool,
    test_match: Regex,
    include: Vec<Regex>,
    exclude: Vec<Regex>,
    extensions: Vec<String>,
}

impl MatchRule {
    pub fn new(options: &DoctestOptions) -> Result<Self, DiscoveryError> {
        Ok(Self {
            doctest_tests: options.doctest_tests,
            test_match: compile("test-match", &options.test_match)?,
            include: compile_all("include", &options.include)?,
            exclude: compile_all("exclude", &options.exclude)?,
            extensions: options.extensions.clone(),
        })
    }

    /// Modules are scanned unless they look like test modules; include
    /// patterns and `doctest_tests` override that. Exclude patterns always win.
    pub fn wants_module(&self, name: &str) -> bool {
        // Module names never end in `.py`; kept for compatibility with
        // hosts that pass this literal.
        if name == "__init__.py" {
            return false;
        }
        let eligible = self.doctest_tests
            || !self.test_match.is_match(name)
            || self.include.iter().any(|re| re.is_match(name));
        eligible && !self.is_excluded(name)
    }

    /// Source files are always wanted; text files with a configured
    /// extension are wanted unless excluded.
    pub fn wants_file(&self, path: &Path) -> bool {
        if path.extension().is_some_and(|ext| ext == SOURCE_EXT) {
            return true;
        }
        self.has_extension(path) && !self.is_excluded(&path.to_string_lossy())
    }

    /// True if `path` ends with one of the text-file extensions.
    pub fn has_extension(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(name))
    }
}

fn compile(kind: &'static str, pattern: &str) -> Result<Regex, DiscoveryError> {
    Regex::new(pattern).map_err(|e| DiscoveryError::Pattern {
        kind,
        pattern: pattern.to_string(),
        source: e,
    })
}

fn compile_all(kind: &'static str, patterns: &[String]) -> Result<Vec<Regex>, DiscoveryError> {
    patterns.iter().map(|p| compile(kind, p)).collect()
}
