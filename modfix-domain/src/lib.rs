//! Domain logic: decide whether a module has the expected shape and rewrite it.
//!
//! This crate owns *what* the rewritten text is. It does not own *where* it is written; that's
//! the `modfix-edit` crate.

mod classify;
mod ports;
mod rename;
mod rewriter;
mod rules;

pub use classify::{classify, missing_markers, ShapeRejection};
pub use ports::{FsSourceView, SourceView};
pub use rename::{RenamePolicy, DEFAULT_RENAME_SUFFIX};
pub use rewriter::Rewriter;
pub use rules::{builtin_rules, count_matches, replace_all, Rule, RuleSet};
