// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Example blocks embedded in documentation.
//!
//! Docstrings and text files may contain interactive examples: a `>>>`
//! prompt, optional `...` continuation lines, then the expected output.
//!
//! ```text
//! def add(a, b):
//!     """
//!     >>> add(1, 2)
//!     3
//!     """
//! ```
//!
//! The [`parser`] turns text into an [`ExampleBlock`]; the [`Finder`]
//! walks a module or class and yields one block per docstring. Running
//! blocks is left to an [`ExampleRunner`].

mod error;
pub mod debug;
pub mod example;
pub mod finder;
pub mod parser;
pub mod runner;

pub use debug::{GuardedDebugger, NoDebugger, TraceControl};
pub use error::{FindError, ParseError};
pub use example::{sort_blocks, Example, ExampleBlock};
pub use finder::Finder;
pub use parser::{parse_block, parse_examples};
pub use runner::{ExampleRunner, RunResult};
