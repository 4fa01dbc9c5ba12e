//! Embeddable core library for modfix.
//!
//! Provides a clap-free, I/O-abstracted entry point for converting a library of modules.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`SourceView`](ports::SourceView) for reading source modules
//! - [`WritePort`](ports::WritePort) for writing files and creating directories
//! - [`ProgressSink`](ports::ProgressSink) for per-file notifications
//!
//! The [`adapters`] module provides default filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`convert_one`](pipeline::convert_one) converts a single named module
//! - [`rewrite_all`](pipeline::rewrite_all) converts every file in the library directory
//! - [`Registry::build`](registry::Registry::build) indexes an output directory

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod registry;
pub mod settings;

// Re-export the domain's SourceView so callers don't need modfix-domain directly.
pub use modfix_domain::SourceView;

// Re-export the error taxonomy so embedders don't need modfix-edit directly.
pub use modfix_edit::{ConvertError, ConvertResult};
