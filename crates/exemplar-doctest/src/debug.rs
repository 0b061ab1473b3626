// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Interactive debugging from inside an example.
//!
//! Leaving a debugger normally clears the process-wide trace hook, which
//! also switches off any coverage measurement running around the tests.
//! [`GuardedDebugger`] only lets that happen when the debugger was
//! actually entered.

use tracing::trace;

/// The trace hooks an interactive debugger drives.
pub trait TraceControl {
    /// Stop in the debugger at the current point.
    fn set_trace(&mut self);
    /// Resume normal execution, dropping the trace hook.
    fn set_continue(&mut self);
}

/// Wraps a debugger and remembers whether it was ever entered.
#[derive(Debug, Default)]
pub struct GuardedDebugger<T> {
    inner: T,
    entered: bool,
}

impl<T: TraceControl> GuardedDebugger<T> {
    pub fn new(inner: T) -> Self {
        Self { inner, entered: false }
    }

    pub fn entered(&self) -> bool {
        self.entered
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: TraceControl> TraceControl for GuardedDebugger<T> {
    fn set_trace(&mut self) {
        self.entered = true;
        self.inner.set_trace();
    }

    fn set_continue(&mut self) {
        if self.entered {
            self.inner.set_continue();
        } else {
            trace!("debugger never entered, leaving trace hook in place");
        }
    }
}

/// A debugger that does nothing, for runs without interactive debugging.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDebugger;

impl TraceControl for NoDebugger {
    fn set_trace(&mut self) {}
    fn set_continue(&mut self) {}
}
