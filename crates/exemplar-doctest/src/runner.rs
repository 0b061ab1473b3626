// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Running example blocks.
//!
//! Execution belongs to whoever embeds discovery; this is the seam it
//! plugs into.

use exemplar_source::Module;

use crate::debug::TraceControl;
use crate::example::ExampleBlock;

/// Result of running one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Name of the block that was run
    pub name: String,
    pub passed: bool,
    /// Description of what happened
    pub message: String,
}

/// Executes a block's examples.
///
/// `context` is the module whose bindings the examples run against, if
/// any. Runners that support interactive debugging drive `debugger`.
pub trait ExampleRunner {
    fn run(
        &mut self,
        block: &ExampleBlock,
        context: Option<&Module>,
        debugger: &mut dyn TraceControl,
    ) -> RunResult;
}
