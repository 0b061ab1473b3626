// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Fixture modules for text files.
//!
//! A text file `docs/guide.txt` with suffix `_fixt` uses the module
//! `guide_fixt`, imported with `docs/` on the search path. Its bindings
//! become the context the file's examples run against.

use std::path::Path;
use std::sync::Arc;

use exemplar_source::{Module, Namespace};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FixtureResolver {
    suffix: String,
}

impl FixtureResolver {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Name of the fixture module for `path`.
    pub fn module_name(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        Some(format!("{stem}{}", self.suffix))
    }

    /// Import the fixture module for `path`.
    ///
    /// The file's directory is appended to the namespace's search path.
    /// A missing or unreadable fixture yields `None`.
    pub fn resolve(&self, path: &Path, namespace: &Namespace) -> Option<Arc<Module>> {
        let name = self.module_name(path)?;
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        if !namespace.search_path().contains(&dir) {
            namespace.extend_search_path(dir);
        }

        match namespace.import(&name) {
            Ok(module) => Some(module),
            Err(e) if e.is_not_found() => {
                debug!(fixture = %name, file = %path.display(), "no fixture module");
                None
            }
            Err(e) => {
                warn!(fixture = %name, error = %e, "cannot load fixture module");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_module_name() {
        let fixtures = FixtureResolver::new("_fixt");
        assert_eq!(
            fixtures.module_name(Path::new("docs/guide.txt")).as_deref(),
            Some("guide_fixt")
        );
    }

    #[test]
    fn test_resolve_adds_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("guide_fixt.py"), "\"\"\"Fixture.\"\"\"\n").unwrap();
        let ns = Namespace::default();

        let module = FixtureResolver::new("_fixt")
            .resolve(&dir.path().join("guide.txt"), &ns)
            .unwrap();
        assert_eq!(module.name, "guide_fixt");
        assert_eq!(ns.search_path(), vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn test_missing_fixture() {
        let dir = TempDir::new().unwrap();
        let ns = Namespace::default();
        let module = FixtureResolver::new("_fixt").resolve(&dir.path().join("guide.txt"), &ns);
        assert!(module.is_none());
    }
}
