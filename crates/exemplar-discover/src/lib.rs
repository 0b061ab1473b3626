// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Doc-example discovery for a test collector.
//!
//! A host walking a project asks [`Doctest`] which modules and files it
//! wants, then loads each into a [`Group`] of [`Case`]s. A module's cases
//! share the module as their context; a text file's group uses its fixture
//! module, when one is configured and found. Every case can be turned back
//! into an [`Address`](exemplar_source::Address) for reporting and
//! re-selection.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use exemplar_discover::{Doctest, DoctestOptions, FileOutcome};
//! use exemplar_source::Namespace;
//!
//! let ns = Arc::new(Namespace::new(vec!["src".into()]));
//! let doctest = Doctest::new(DoctestOptions::from_env(), Arc::clone(&ns))?;
//! if let Ok(FileOutcome::Loaded(group)) = doctest.load_from_file(Path::new("docs/guide.txt")) {
//!     for case in &group {
//!         println!("{case}");
//!     }
//! }
//! # Ok::<(), exemplar_discover::DiscoveryError>(())
//! ```

mod case;
mod error;
mod fixture;
mod matcher;
mod plugin;
pub mod options;
pub mod report;
pub mod resolve;
mod suite;

pub use case::Case;
pub use error::DiscoveryError;
pub use exemplar_source::ResolveError;
pub use fixture::FixtureResolver;
pub use matcher::MatchRule;
pub use options::{DoctestOptions, DEFAULT_TEST_MATCH};
pub use plugin::{Doctest, FileOutcome};
pub use suite::Group;
