// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Find example blocks on source entities.
//!
//! Searching a module visits its docstring, then every class and function
//! it declares; searching a class visits its docstring, methods, nested
//! classes and properties. Function bodies are not searched. Each
//! docstring becomes one block named by its dotted path from the search
//! root (`pkg.mod`, `pkg.mod.C`, `pkg.mod.C.p`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use exemplar_source::{Module, Object};
use tracing::warn;

use crate::error::FindError;
use crate::example::ExampleBlock;
use crate::parser::parse_block;

/// Entities without a docstring produce no block.
#[derive(Debug, Clone, Default)]
pub struct Finder;

impl Finder {
    pub fn new() -> Self {
        Self
    }

    /// Find every block reachable from `obj`.
    ///
    /// `name` defaults to the entity's own name; `module` defaults to the
    /// module that declared `obj` and decides both which members count as
    /// local and which file the blocks are attributed to. Docstrings that
    /// fail to parse are logged and skipped.
    pub fn find(
        &self,
        obj: &Object,
        name: Option<&str>,
        module: Option<&Module>,
    ) -> Result<Vec<ExampleBlock>, FindError> {
        let name = match name {
            Some(name) => name.to_string(),
            None => obj
                .name()
                .ok_or(FindError::Unnamed { kind: obj.kind() })?
                .to_string(),
        };
        let module_name = module
            .map(|m| m.name.clone())
            .or_else(|| obj.module_name().map(str::to_string));
        let filename = module.map(|m| m.file.clone()).or_else(|| source_file(obj));

        let mut blocks = Vec::new();
        self.find_into(
            &mut blocks,
            obj,
            &name,
            module_name.as_deref(),
            filename.as_deref(),
        );
        Ok(blocks)
    }

    fn find_into(
        &self,
        blocks: &mut Vec<ExampleBlock>,
        obj: &Object,
        name: &str,
        module: Option<&str>,
        filename: Option<&Path>,
    ) {
        if let Some(block) = self.block_for(obj, name, filename) {
            blocks.push(block);
        }

        let in_class = matches!(obj, Object::Class(_));
        if !in_class && !matches!(obj, Object::Module(_)) {
            return;
        }

        for member in obj.members() {
            let wanted = match &member.object {
                Object::Class(_) | Object::Function(_) => true,
                Object::Property(_) => in_class,
                Object::Module(_) => false,
            };
            if wanted && from_module(module, &member.object) {
                let member_name = format!("{}.{}", name, member.name);
                self.find_into(blocks, &member.object, &member_name, module, filename);
            }
        }
    }

    fn block_for(&self, obj: &Object, name: &str, filename: Option<&Path>) -> Option<ExampleBlock> {
        let doc = obj.doc().filter(|doc| !doc.text.is_empty())?;

        match parse_block(&doc.text, BTreeMap::new(), name, filename, doc.line) {
            Ok(block) => Some(block),
            Err(e) => {
                warn!(test = name, error = %e, "skipping docstring with unparsable examples");
                None
            }
        }
    }
}

/// Members imported from elsewhere are not searched. Properties can't be
/// traced to a module and always count as local.
fn from_module(module: Option<&str>, obj: &Object) -> bool {
    match (module, obj.module_name()) {
        (Some(module), Some(declared)) => module == declared,
        _ => true,
    }
}

fn source_file(obj: &Object) -> Option<PathBuf> {
    match obj {
        Object::Module(m) => Some(m.file.clone()),
        Object::Class(c) => Some(c.file.clone()),
        Object::Function(f) => Some(f.file.clone()),
        Object::Property(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exemplar_source::parse_module;
    use std::sync::Arc;

    const SOURCE: &str = r#""""Module.

>>> 1 + 1
2
"""

def f():
    """
    >>> f()
    1
    """


def undocumented():
    pass


class C:
    """No examples here."""

    @property
    def p(self):
        """
        >>> C().p
        2
        """

    def broken(self):
        """
        >>>oops
        """
"#;

    fn module() -> Arc<Module> {
        Arc::new(parse_module("pkg.mod", Path::new("pkg/mod.py"), SOURCE).unwrap())
    }

    #[test]
    fn test_find_module() {
        let module = module();
        let blocks = Finder::new()
            .find(&Object::Module(Arc::clone(&module)), None, None)
            .unwrap();
        let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
        // `undocumented` has no docstring and `C.broken` fails to parse
        assert_eq!(names, vec!["pkg.mod", "pkg.mod.f", "pkg.mod.C", "pkg.mod.C.p"]);

        assert!(blocks.iter().all(|b| b.filename.as_deref() == Some(Path::new("pkg/mod.py"))));
        assert!(blocks[2].is_empty());
        assert_eq!(blocks[3].examples[0].want, "2\n");
    }

    #[test]
    fn test_undocumented_entities_skipped() {
        let module = module();
        let blocks = Finder::new().find(&Object::Module(module), None, None).unwrap();
        assert!(!blocks.iter().any(|b| b.name == "pkg.mod.undocumented"));
    }

    #[test]
    fn test_find_entity_with_name() {
        let module = module();
        let class = Object::Module(Arc::clone(&module)).attr("C").unwrap();
        let blocks = Finder::new().find(&class, None, Some(&module)).unwrap();
        let names: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["C", "C.p"]);
    }

    #[test]
    fn test_property_needs_name() {
        let module = module();
        let prop = Object::Module(Arc::clone(&module))
            .attr("C")
            .and_then(|c| c.attr("p"))
            .unwrap();
        assert!(matches!(
            Finder::new().find(&prop, None, Some(&module)),
            Err(FindError::Unnamed { .. })
        ));
        let blocks = Finder::new().find(&prop, Some("p"), Some(&module)).unwrap();
        assert_eq!(blocks.len(), 1);
    }
}
