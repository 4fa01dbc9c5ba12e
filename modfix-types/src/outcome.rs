use crate::marker::Marker;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Reason recorded for every shape rejection.
pub const SHAPE_REASON: &str = "does not match expected shape";

/// Terminal state of one source file within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransformOutcome {
    Converted {
        /// Destination path the rewritten text was (or would be, in dry-run) written to.
        destination: Utf8PathBuf,
    },
    Skipped {
        reason: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        missing: Vec<Marker>,
    },
    Failed {
        error: String,
    },
}

impl TransformOutcome {
    pub fn skipped(missing: Vec<Marker>) -> Self {
        TransformOutcome::Skipped {
            reason: SHAPE_REASON.to_string(),
            missing,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, TransformOutcome::Converted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TransformOutcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TransformOutcome::Failed { .. })
    }
}

/// One file's outcome, keyed by its source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub outcome: TransformOutcome,
}

/// Aggregate of a batch run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub converted: u64,
    pub skipped: u64,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl RunSummary {
    /// Record an outcome and bump the matching counter. Failed outcomes are kept but not counted.
    pub fn record(&mut self, name: impl Into<String>, outcome: TransformOutcome) {
        match &outcome {
            TransformOutcome::Converted { .. } => self.converted += 1,
            TransformOutcome::Skipped { .. } => self.skipped += 1,
            TransformOutcome::Failed { .. } => {}
        }
        self.files.push(FileRecord {
            name: name.into(),
            outcome,
        });
    }

    pub fn total(&self) -> u64 {
        self.files.len() as u64
    }
}
