// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source entities: modules, classes, functions and properties.
//!
//! Entities form a containment tree (module → class → method, module →
//! function). Modules, classes and functions know which module declared
//! them. Properties don't: like a `property` descriptor, they only carry
//! their docstring, so anything that needs their location has to go back
//! through the owning class.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A docstring and the (0-based) line its literal starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docstring {
    pub text: String,
    pub line: usize,
}

/// Kind of a source entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Module,
    Class,
    Function,
    Property,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectKind::Module => "module",
            ObjectKind::Class => "class",
            ObjectKind::Function => "function",
            ObjectKind::Property => "property",
        };
        f.write_str(s)
    }
}

/// A loaded module.
#[derive(Debug)]
pub struct Module {
    /// Full dotted name (`pkg.mod`).
    pub name: String,
    /// Source file the module was read from.
    pub file: PathBuf,
    pub doc: Option<Docstring>,
    /// Top-level classes and functions in declaration order.
    pub members: Vec<Member>,
    /// Value of a module-level `__test__` marker: unset, truthy or falsy.
    pub test_marker: Option<bool>,
}

/// A class body.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    /// Dotted path from the module (`Outer.Inner`).
    pub qualname: String,
    pub module: String,
    pub file: PathBuf,
    pub line: usize,
    pub doc: Option<Docstring>,
    /// Methods, properties and nested classes in declaration order.
    pub members: Vec<Member>,
}

/// A function or method.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub qualname: String,
    pub module: String,
    pub file: PathBuf,
    pub line: usize,
    pub doc: Option<Docstring>,
}

/// A property descriptor. Anonymous: the name it is bound to lives in the
/// class body, not on the property.
#[derive(Debug)]
pub struct Property {
    pub line: usize,
    pub doc: Option<Docstring>,
}

/// Shared handle to any source entity.
#[derive(Debug, Clone)]
pub enum Object {
    Module(Arc<Module>),
    Class(Arc<Class>),
    Function(Arc<Function>),
    Property(Arc<Property>),
}

/// A class member together with the name it is bound to.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub object: Object,
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Module(_) => ObjectKind::Module,
            Object::Class(_) => ObjectKind::Class,
            Object::Function(_) => ObjectKind::Function,
            Object::Property(_) => ObjectKind::Property,
        }
    }

    /// The entity's own name. Modules report their full dotted name,
    /// properties have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Object::Module(m) => Some(&m.name),
            Object::Class(c) => Some(&c.name),
            Object::Function(f) => Some(&f.name),
            Object::Property(_) => None,
        }
    }

    pub fn doc(&self) -> Option<&Docstring> {
        match self {
            Object::Module(m) => m.doc.as_ref(),
            Object::Class(c) => c.doc.as_ref(),
            Object::Function(f) => f.doc.as_ref(),
            Object::Property(p) => p.doc.as_ref(),
        }
    }

    /// Name of the module that declared this entity, if it is known.
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Object::Module(m) => Some(&m.name),
            Object::Class(c) => Some(&c.module),
            Object::Function(f) => Some(&f.module),
            Object::Property(_) => None,
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self, Object::Property(_))
    }

    /// Named members reachable by attribute lookup.
    pub fn members(&self) -> &[Member] {
        match self {
            Object::Module(m) => &m.members,
            Object::Class(c) => &c.members,
            Object::Function(_) | Object::Property(_) => &[],
        }
    }

    /// Look up an attribute the way `getattr` on a module or class would.
    pub fn attr(&self, name: &str) -> Option<Object> {
        self.members()
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.object.clone())
    }

    /// True when both handles point at the same entity.
    pub fn same(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Module(a), Object::Module(b)) => Arc::ptr_eq(a, b),
            (Object::Class(a), Object::Class(b)) => Arc::ptr_eq(a, b),
            (Object::Function(a), Object::Function(b)) => Arc::ptr_eq(a, b),
            (Object::Property(a), Object::Property(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
