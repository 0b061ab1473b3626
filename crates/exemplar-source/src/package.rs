// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Package discovery from the filesystem.
//!
//! A directory is a package when it holds an `__init__.py`. A source
//! file's dotted name is built by walking up through package directories
//! (`src/pkg/sub/mod.py` is `pkg.sub.mod` when `pkg` and `sub` are
//! packages and `src` is not).

use std::path::Path;

use crate::namespace::SOURCE_EXT;

/// True if `path` is a directory containing `__init__.py`.
pub fn is_package(path: &Path) -> bool {
    path.is_dir() && path.join("__init__.py").is_file()
}

/// Full dotted name of the module or package at `path`, or `None` when
/// `path` is neither a source file nor a package.
pub fn package_name(path: &Path) -> Option<String> {
    let is_source = path.extension().is_some_and(|ext| ext == SOURCE_EXT);
    if (path.is_dir() || !is_source) && !is_package(path) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    let mut parts = Vec::new();
    if stem != "__init__" {
        parts.push(stem.to_string());
    }

    let mut dir = path.parent();
    while let Some(current) = dir {
        let Some(name) = current.file_name().and_then(|n| n.to_str()) else {
            break;
        };
        if !is_package(current) {
            break;
        }
        parts.push(name.to_string());
        dir = current.parent();
    }

    parts.reverse();
    Some(parts.join("."))
}
