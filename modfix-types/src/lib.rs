//! Shared DTOs for the modfix workspace.
//!
//! # Design constraints
//! - Report types are serialized to disk; prefer adding optional fields over changing semantics.
//! - Nothing in here performs I/O.

pub mod marker;
pub mod module;
pub mod outcome;
pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const MODFIX_REPORT_V1: &str = "modfix.report.v1";
    pub const MODFIX_REGISTRY_V1: &str = "modfix.registry.v1";
}
