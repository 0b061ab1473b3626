// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Entry points a test collector calls while walking a project.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use exemplar_doctest::{parse_block, sort_blocks, ExampleBlock, Finder};
use exemplar_source::{Address, Module, Namespace, Object, ResolveError};
use tracing::{debug, warn};

use crate::case::Case;
use crate::error::DiscoveryError;
use crate::fixture::FixtureResolver;
use crate::matcher::MatchRule;
use crate::options::DoctestOptions;
use crate::suite::Group;

/// What loading a file produced.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file's extension is not configured for discovery.
    NotApplicable,
    /// The file was read but holds no examples.
    NoExamples,
    Loaded(Group),
}

/// Doc-example discovery over one namespace.
#[derive(Debug)]
pub struct Doctest {
    rule: MatchRule,
    finder: Finder,
    fixtures: Option<FixtureResolver>,
    namespace: Arc<Namespace>,
}

impl Doctest {
    /// Fails if any configured pattern does not compile.
    pub fn new(options: DoctestOptions, namespace: Arc<Namespace>) -> Result<Self, DiscoveryError> {
        let rule = MatchRule::new(&options)?;
        let fixtures = options
            .fixtures
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(FixtureResolver::new);
        debug!(
            doctest_tests = options.doctest_tests,
            extensions = ?options.extensions,
            fixtures = ?options.fixtures,
            "doctest discovery configured"
        );
        Ok(Self {
            rule,
            finder: Finder::new(),
            fixtures,
            namespace,
        })
    }

    pub fn namespace(&self) -> &Arc<Namespace> {
        &self.namespace
    }

    pub fn wants_module(&self, name: &str) -> bool {
        self.rule.wants_module(name)
    }

    pub fn wants_file(&self, path: &Path) -> bool {
        self.rule.wants_file(path)
    }

    /// Collect the examples in `module` as one group.
    ///
    /// Returns `None` when the module is not wanted, sets a falsy
    /// `__test__` marker, or holds no examples.
    pub fn load_from_module(&self, module: &Arc<Module>) -> Option<Group> {
        if !self.wants_module(&module.name) {
            debug!(module = %module.name, "module not wanted");
            return None;
        }
        if module.test_marker == Some(false) {
            debug!(module = %module.name, "module opted out with __test__");
            return None;
        }

        let mut blocks = self.find(&Object::Module(Arc::clone(module)), None, None);
        sort_blocks(&mut blocks);

        let cases: Vec<Case> = blocks
            .into_iter()
            .filter(|block| !block.is_empty())
            .map(|mut block| {
                if block.filename.is_none() {
                    block.filename = Some(module.file.clone());
                }
                Case::doctest(block)
            })
            .collect();

        if cases.is_empty() {
            return None;
        }
        debug!(module = %module.name, cases = cases.len(), "collected examples");
        Some(Group::new(cases, Some(Arc::clone(module))))
    }

    /// Cases for one entity found in `module`, each remembering the entity.
    ///
    /// Entities without a name are labelled `Unnamed <kind>`.
    pub fn make_cases(&self, obj: &Object, module: &Module) -> Vec<Case> {
        let name = match obj.name() {
            Some(name) => name.to_string(),
            None => format!("Unnamed {}", obj.kind()),
        };
        self.find(obj, Some(&name), Some(module))
            .into_iter()
            .filter(|block| !block.is_empty())
            .map(|block| Case::with_entity(block, obj.clone()))
            .collect()
    }

    /// Collect the examples in a text file.
    ///
    /// Read and parse failures are returned; a file that parses but holds
    /// no examples is [`FileOutcome::NoExamples`].
    pub fn load_from_file(&self, path: &Path) -> Result<FileOutcome, DiscoveryError> {
        if !self.rule.has_extension(path) {
            return Ok(FileOutcome::NotApplicable);
        }

        let text = fs::read_to_string(path).map_err(|e| DiscoveryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let context = self
            .fixtures
            .as_ref()
            .and_then(|fixtures| fixtures.resolve(path, &self.namespace));

        let mut globs = BTreeMap::new();
        globs.insert("__file__".to_string(), path.display().to_string());
        let block = parse_block(&text, globs, &name, Some(path), 0).map_err(|e| {
            DiscoveryError::Parse {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        if block.is_empty() {
            debug!(file = %path.display(), "no examples in file");
            return Ok(FileOutcome::NoExamples);
        }
        Ok(FileOutcome::Loaded(Group::new(
            vec![Case::doc_file(block)],
            context,
        )))
    }

    /// Address of `case` within this namespace.
    pub fn address(&self, case: &Case) -> Result<Address, ResolveError> {
        case.address(&self.namespace)
    }

    fn find(&self, obj: &Object, name: Option<&str>, module: Option<&Module>) -> Vec<ExampleBlock> {
        match self.finder.find(obj, name, module) {
            Ok(blocks) => blocks,
            Err(e) => {
                warn!(error = %e, "cannot search for examples");
                Vec::new()
            }
        }
    }
}
