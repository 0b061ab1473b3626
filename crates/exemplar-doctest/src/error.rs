// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Example-block errors.

use exemplar_source::ObjectKind;
use thiserror::Error;

/// A docstring whose examples can't be parsed.
///
/// Lines are 1-based and relative to the start of the docstring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line} of the docstring for {name} lacks blank after {prompt}: {text:?}")]
    LacksBlank {
        name: String,
        line: usize,
        prompt: &'static str,
        text: String,
    },

    #[error("line {line} of the docstring for {name} has inconsistent leading whitespace: {text:?}")]
    InconsistentIndent {
        name: String,
        line: usize,
        text: String,
    },
}

/// Failure to search an entity for example blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FindError {
    #[error("a name must be given to search a {kind}, it has none of its own")]
    Unnamed { kind: ObjectKind },
}
