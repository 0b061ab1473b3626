// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The global module namespace: a search path, a cache of loaded modules
//! and dotted-name resolution on top of both.
//!
//! A module `a.b.c` is looked up as `<dir>/a/b/c.py` or
//! `<dir>/a/b/c/__init__.py` for each search-path directory in order. The
//! search path only ever grows; several discovery passes may append to it
//! and duplicate entries are harmless.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use crate::error::{ImportError, ResolveError, SourceError};
use crate::object::{Module, Object};
use crate::outline::parse_module;

/// Source extension of importable modules.
pub const SOURCE_EXT: &str = "py";

#[derive(Debug, Default)]
pub struct Namespace {
    search_path: RwLock<Vec<PathBuf>>,
    modules: RwLock<HashMap<String, Arc<Module>>>,
}

impl Namespace {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self {
            search_path: RwLock::new(search_path),
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of the current search path.
    pub fn search_path(&self) -> Vec<PathBuf> {
        self.search_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Append a directory to the search path.
    pub fn extend_search_path(&self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        debug!(dir = %dir.display(), "extending module search path");
        self.search_path
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(dir);
    }

    /// A previously loaded module.
    pub fn get(&self, name: &str) -> Option<Arc<Module>> {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Register an already-built module under its own name, replacing any
    /// module previously loaded under that name.
    pub fn insert(&self, module: Module) -> Arc<Module> {
        let module = Arc::new(module);
        self.modules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(module.name.clone(), Arc::clone(&module));
        module
    }

    /// Load the module `name` from an explicit file and register it.
    pub fn load_file(&self, name: &str, path: &Path) -> Result<Arc<Module>, SourceError> {
        let source = fs::read_to_string(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let module = parse_module(name, path, &source)?;
        Ok(self.insert(module))
    }

    /// Import a module by dotted name, loading it from the search path on
    /// first use.
    pub fn import(&self, name: &str) -> Result<Arc<Module>, ImportError> {
        if let Some(module) = self.get(name) {
            return Ok(module);
        }

        let path = self.find_module(name).ok_or_else(|| ImportError::NotFound {
            name: name.to_string(),
        })?;
        trace!(module = name, path = %path.display(), "importing module");

        self.load_file(name, &path).map_err(|e| ImportError::Source {
            name: name.to_string(),
            source: e,
        })
    }

    fn find_module(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.split('.').any(str::is_empty) {
            return None;
        }
        let rel: PathBuf = name.split('.').collect();

        for dir in self.search_path() {
            let base = dir.join(&rel);
            let file = base.with_extension(SOURCE_EXT);
            if file.is_file() {
                return Some(file);
            }
            let init = base.join("__init__.py");
            if init.is_file() {
                return Some(init);
            }
        }
        None
    }

    /// Resolve a dotted name to an object: import the longest importable
    /// prefix, then walk the rest as attributes.
    pub fn resolve_name(&self, name: &str) -> Result<Object, ResolveError> {
        let parts: Vec<&str> = name.split('.').collect();
        if name.is_empty() {
            return Err(ResolveError::EmptyName);
        }

        let mut split = parts.len();
        let module = loop {
            let candidate = parts[..split].join(".");
            match self.import(&candidate) {
                Ok(module) => break module,
                Err(e) if e.is_not_found() && split > 1 => split -= 1,
                Err(e) => {
                    return Err(ResolveError::Import {
                        name: name.to_string(),
                        source: e,
                    })
                }
            }
        };

        let mut obj = Object::Module(module);
        let mut owner = parts[..split].join(".");
        for part in &parts[split..] {
            obj = obj.attr(part).ok_or_else(|| ResolveError::MissingAttribute {
                owner: owner.clone(),
                attr: part.to_string(),
            })?;
            owner.push('.');
            owner.push_str(part);
        }
        Ok(obj)
    }
}
