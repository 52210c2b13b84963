//! tinypack — a minimal module bundler core.
//!
//! Given a root directory and an entry-point file, tinypack discovers every
//! file transitively required by that entry point and concatenates their
//! source text into a single bundle, visiting each file exactly once even
//! across dependency cycles.
//!
//! The pipeline runs four phases in strict order, each consuming the
//! previous phase's output as an immutable value:
//!
//! 1. [`index::build_index`] crawls the root, filters by extension, and
//!    statically extracts each file's dependency specifiers into a
//!    [`ModuleIndex`].
//! 2. [`resolve::Resolver`] maps a raw specifier plus its referencing file
//!    to an indexed absolute path.
//! 3. [`graph::build_graph`] walks the graph breadth-first from the entry
//!    point into a cycle-safe [`ReachableSet`].
//! 4. [`serialize::serialize_bundle`] concatenates the reachable files'
//!    source in discovery order.
//!
//! Specifier extraction is purely static: computed or conditional module
//! references are silently skipped. Bare (non-relative) specifiers are not
//! resolved by this core.

pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod index;
pub mod resolve;
pub mod serialize;

pub use config::BundleConfig;
pub use emit::BuildReport;
pub use error::{BundleError, Result};
pub use graph::{build_graph, ReachableSet};
pub use index::{build_index, extract_specifiers, IndexCache, ModuleIndex, ModuleRecord};
pub use resolve::Resolver;
pub use serialize::serialize_bundle;
