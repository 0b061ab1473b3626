// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Test addresses: where a test lives, in a form a runner can report on
//! and re-invoke.

use std::fmt;
use std::path::PathBuf;

use crate::error::ResolveError;
use crate::object::Object;

/// `(filename, module, call path)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    pub filename: PathBuf,
    pub module: Option<String>,
    pub call_path: Option<String>,
}

impl Address {
    pub fn new(filename: impl Into<PathBuf>, module: Option<String>, call_path: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            module,
            call_path,
        }
    }

    /// An address with a file but no module or call path.
    pub fn file(filename: impl Into<PathBuf>) -> Self {
        Self::new(filename, None, None)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename.display())?;
        if let Some(module) = &self.module {
            write!(f, ":{}", module)?;
        }
        if let Some(call_path) = &self.call_path {
            write!(f, ":{}", call_path)?;
        }
        Ok(())
    }
}

/// Address of a module, class or function.
///
/// Properties carry no link to their class or module and are rejected.
pub fn address_of(obj: &Object) -> Result<Address, ResolveError> {
    match obj {
        Object::Module(m) => Ok(Address::new(&m.file, Some(m.name.clone()), None)),
        Object::Class(c) => Ok(Address::new(
            &c.file,
            Some(c.module.clone()),
            Some(c.qualname.clone()),
        )),
        Object::Function(f) => Ok(Address::new(
            &f.file,
            Some(f.module.clone()),
            Some(f.qualname.clone()),
        )),
        Object::Property(p) => Err(ResolveError::Unaddressable {
            name: format!("property at line {}", p.line + 1),
        }),
    }
}
