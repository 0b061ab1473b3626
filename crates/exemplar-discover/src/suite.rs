// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Groups of cases sharing one execution context.

use std::fmt;
use std::sync::Arc;

use exemplar_doctest::{ExampleRunner, RunResult, TraceControl};
use exemplar_source::{Address, Module};
use tracing::debug;

use crate::case::Case;

/// Cases discovered together, run in order against one context.
///
/// A group is never split across workers: its cases share module state.
#[derive(Debug, Clone)]
pub struct Group {
    cases: Vec<Case>,
    context: Option<Arc<Module>>,
}

impl Group {
    pub fn new(cases: Vec<Case>, context: Option<Arc<Module>>) -> Self {
        Self { cases, context }
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Case> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// The module the cases run against: the scanned module, or a text
    /// file's fixture module.
    pub fn context(&self) -> Option<&Arc<Module>> {
        self.context.as_ref()
    }

    pub fn can_split(&self) -> bool {
        false
    }

    /// Address of the context module, if there is one.
    pub fn address(&self) -> Option<Address> {
        self.context
            .as_ref()
            .map(|m| Address::new(&m.file, Some(m.name.clone()), None))
    }

    /// Run every case in order.
    pub fn run(
        &self,
        runner: &mut dyn ExampleRunner,
        debugger: &mut dyn TraceControl,
    ) -> Vec<RunResult> {
        let context = self.context.as_deref();
        debug!(
            cases = self.cases.len(),
            context = context.map(|m| m.name.as_str()),
            "running group"
        );
        self.cases
            .iter()
            .map(|case| case.run(runner, context, debugger))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a Case;
    type IntoIter = std::slice::Iter<'a, Case>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, case) in self.cases.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{case}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exemplar_doctest::{ExampleBlock, NoDebugger};
    use exemplar_source::parse_module;
    use std::collections::BTreeMap;
    use std::path::Path;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Option<String>)>,
    }

    impl ExampleRunner for Recorder {
        fn run(
            &mut self,
            block: &ExampleBlock,
            context: Option<&Module>,
            _debugger: &mut dyn TraceControl,
        ) -> RunResult {
            self.seen
                .push((block.name.clone(), context.map(|m| m.name.clone())));
            RunResult {
                name: block.name.clone(),
                passed: true,
                message: String::new(),
            }
        }
    }

    fn case(name: &str) -> Case {
        Case::doctest(ExampleBlock {
            name: name.to_string(),
            filename: None,
            lineno: 0,
            docstring: String::new(),
            examples: Vec::new(),
            globs: BTreeMap::new(),
        })
    }

    fn module() -> Arc<Module> {
        Arc::new(parse_module("m", Path::new("/src/m.py"), "").unwrap())
    }

    #[test]
    fn test_group_basics() {
        let group = Group::new(vec![case("m.a"), case("m.b")], Some(module()));
        assert_eq!(group.len(), 2);
        assert!(!group.can_split());
        assert_eq!(group.to_string(), "[a (m), b (m)]");
        let names: Vec<String> = group.iter().map(Case::id).collect();
        assert_eq!(names, vec!["m.a", "m.b"]);

        let addr = group.address().unwrap();
        assert_eq!(addr, Address::new("/src/m.py", Some("m".into()), None));
    }

    #[test]
    fn test_address_without_context() {
        let group = Group::new(vec![case("guide")], None);
        assert_eq!(group.address(), None);
    }

    #[test]
    fn test_run_in_order_with_context() {
        let group = Group::new(vec![case("m.b"), case("m.a")], Some(module()));
        let mut recorder = Recorder::default();
        let results = group.run(&mut recorder, &mut NoDebugger);
        assert_eq!(results.len(), 2);
        assert_eq!(
            recorder.seen,
            vec![
                ("m.b".to_string(), Some("m".to_string())),
                ("m.a".to_string(), Some("m".to_string())),
            ]
        );
    }
}
