// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source, import and resolution error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a source file into a module outline.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load the Python grammar: {0}")]
    Grammar(String),

    #[error("failed to parse {}", path.display())]
    Parse { path: PathBuf },
}

/// Failure to import a module by dotted name.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no module named `{name}`")]
    NotFound { name: String },

    #[error("cannot import `{name}`: {source}")]
    Source {
        name: String,
        #[source]
        source: SourceError,
    },
}

impl ImportError {
    /// True when no file for the module exists on the search path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ImportError::NotFound { .. })
    }
}

/// Failure to find an object by dotted name, or to address it.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot resolve `{name}`: {source}")]
    Import {
        name: String,
        #[source]
        source: ImportError,
    },

    #[error("`{owner}` has no attribute `{attr}`")]
    MissingAttribute { owner: String, attr: String },

    #[error("`{name}` is not attached to any module and has no address")]
    Unaddressable { name: String },

    #[error("cannot resolve an empty name")]
    EmptyName,
}
