// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Example blocks.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One `>>>` prompt and the output it should print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Source with prompts stripped, newline-terminated.
    pub source: String,
    /// Expected output, newline-terminated; empty if nothing is printed.
    pub want: String,
    /// Line of the prompt, 0-based, relative to the start of the docstring.
    pub lineno: usize,
    /// Indentation of the prompt.
    pub indent: usize,
}

/// All examples in one docstring or text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleBlock {
    /// Dotted name of the entity the block was found on, or the base name
    /// of a text file.
    pub name: String,
    pub filename: Option<PathBuf>,
    /// Line the docstring starts on, 0-based.
    pub lineno: usize,
    pub docstring: String,
    pub examples: Vec<Example>,
    /// Initial bindings visible to the examples.
    pub globs: BTreeMap<String, String>,
}

impl ExampleBlock {
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Blocks sort by name, then file, then line.
    pub fn sort_key(&self) -> (&str, Option<&Path>, usize) {
        (&self.name, self.filename.as_deref(), self.lineno)
    }
}

/// Sort blocks into their deterministic discovery order.
pub fn sort_blocks(blocks: &mut [ExampleBlock]) {
    blocks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, lineno: usize) -> ExampleBlock {
        ExampleBlock {
            name: name.to_string(),
            filename: Some(PathBuf::from("m.py")),
            lineno,
            docstring: String::new(),
            examples: Vec::new(),
            globs: BTreeMap::new(),
        }
    }

    #[test]
    fn test_sort_blocks() {
        let mut blocks = vec![block("m.g", 9), block("m", 0), block("m.C.p", 4), block("m.C", 2)];
        sort_blocks(&mut blocks);
        let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["m", "m.C", "m.C.p", "m.g"]);
    }
}
