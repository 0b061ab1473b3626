// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Test cases wrapping example blocks.

use std::fmt;
use std::hash::{Hash, Hasher};

use exemplar_doctest::{ExampleBlock, ExampleRunner, RunResult, TraceControl};
use exemplar_source::{package_name, Address, Module, Namespace, Object, ResolveError};

use crate::resolve;

#[derive(Debug, Clone)]
enum Origin {
    /// Found on a source entity; the entity is kept when it is known.
    Entity(Option<Object>),
    /// Parsed from a standalone text file.
    File,
}

/// One example block, identified and labelled for a test runner.
///
/// Cases compare equal when their ids match.
#[derive(Debug, Clone)]
pub struct Case {
    block: ExampleBlock,
    origin: Origin,
}

impl Case {
    /// A case for a block found on a source entity that is not retained.
    pub fn doctest(block: ExampleBlock) -> Self {
        Self {
            block,
            origin: Origin::Entity(None),
        }
    }

    /// A case that remembers the entity it came from.
    pub fn with_entity(block: ExampleBlock, entity: Object) -> Self {
        Self {
            block,
            origin: Origin::Entity(Some(entity)),
        }
    }

    /// A case for a text file.
    pub fn doc_file(block: ExampleBlock) -> Self {
        Self {
            block,
            origin: Origin::File,
        }
    }

    pub fn block(&self) -> &ExampleBlock {
        &self.block
    }

    pub fn entity(&self) -> Option<&Object> {
        match &self.origin {
            Origin::Entity(entity) => entity.as_ref(),
            Origin::File => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.origin, Origin::File)
    }

    /// Stable identifier.
    ///
    /// Entity cases are prefixed with the package of their file when the
    /// block name does not already start with it. File cases use the file's
    /// base name with dots replaced by underscores.
    pub fn id(&self) -> String {
        let name = &self.block.name;
        match self.origin {
            Origin::File => name.replace('.', "_"),
            Origin::Entity(_) => {
                match self.block.filename.as_deref().and_then(package_name) {
                    Some(package) if !name.starts_with(package.as_str()) => {
                        format!("{package}.{name}")
                    }
                    _ => name.clone(),
                }
            }
        }
    }

    pub fn short_description(&self) -> String {
        match self.origin {
            Origin::File => format!("Doctest: {}", self.block.name),
            Origin::Entity(_) => format!("Doctest: {}", self.id()),
        }
    }

    pub fn address(&self, namespace: &Namespace) -> Result<Address, ResolveError> {
        resolve::address(self, namespace)
    }

    pub fn run(
        &self,
        runner: &mut dyn ExampleRunner,
        context: Option<&Module>,
        debugger: &mut dyn TraceControl,
    ) -> RunResult {
        runner.run(&self.block, context, debugger)
    }
}

/// `leaf (prefix)` for entity cases; the id for file cases.
impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();
        if self.is_file() {
            return f.write_str(&id);
        }
        match id.rsplit_once('.') {
            Some((prefix, leaf)) => write!(f, "{leaf} ({prefix})"),
            None => write!(f, "{id} ()"),
        }
    }
}

impl PartialEq for Case {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Case {}

impl Hash for Case {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn block(name: &str, filename: Option<&Path>) -> ExampleBlock {
        ExampleBlock {
            name: name.to_string(),
            filename: filename.map(Path::to_path_buf),
            lineno: 0,
            docstring: String::new(),
            examples: Vec::new(),
            globs: BTreeMap::new(),
        }
    }

    fn package_tree() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();
        let file = pkg.join("mod.py");
        fs::write(&file, "").unwrap();
        (dir, file)
    }

    #[test]
    fn test_id_with_package_prefix() {
        let (_dir, file) = package_tree();
        let case = Case::doctest(block("pkg.mod.f", Some(&file)));
        assert_eq!(case.id(), "pkg.mod.f");

        let case = Case::doctest(block("C.m", Some(&file)));
        assert_eq!(case.id(), "pkg.mod.C.m");
    }

    #[test]
    fn test_id_without_filename() {
        let case = Case::doctest(block("m.f", None));
        assert_eq!(case.id(), "m.f");
        assert_eq!(case.to_string(), "f (m)");
        assert_eq!(case.short_description(), "Doctest: m.f");
    }

    #[test]
    fn test_label_without_dots() {
        let case = Case::doctest(block("f", None));
        assert_eq!(case.to_string(), "f ()");
    }

    #[test]
    fn test_file_case() {
        let case = Case::doc_file(block("guide.txt", Some(Path::new("docs/guide.txt"))));
        assert_eq!(case.id(), "guide_txt");
        assert_eq!(case.to_string(), "guide_txt");
        assert_eq!(case.short_description(), "Doctest: guide.txt");
        assert!(case.entity().is_none());
    }

    #[test]
    fn test_equality_by_id() {
        let a = Case::doctest(block("m.f", None));
        let mut other = block("m.f", None);
        other.lineno = 40;
        let b = Case::doctest(other);
        let c = Case::doctest(block("m.g", None));
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Case> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
