// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source entities for doc-example discovery.
//!
//! Python modules are read into outlines of their classes, functions and
//! properties. A [`Namespace`] imports modules from a search path and
//! resolves dotted names back to entities; [`address_of`] turns an entity
//! into the `(filename, module, call path)` triple test runners report.

mod error;
mod address;
mod namespace;
pub mod object;
pub mod outline;
pub mod package;

pub use address::{address_of, Address};
pub use error::{ImportError, ResolveError, SourceError};
pub use namespace::{Namespace, SOURCE_EXT};
pub use object::{Class, Docstring, Function, Member, Module, Object, ObjectKind, Property};
pub use outline::parse_module;
pub use package::{is_package, package_name};
