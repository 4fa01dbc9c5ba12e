use crate::module::RuleHit;
use crate::outcome::{RunSummary, TransformOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub dry_run: bool,
}

/// Per-file entry of a run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub outcome: TransformOutcome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sha256: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_sha256: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rule_hits: Vec<RuleHit>,
}

/// Serializable record of one `convert` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub run_id: Uuid,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub library_dir: String,
    pub out_dir: String,
    pub converted: u64,
    pub skipped: u64,

    #[serde(default)]
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new(tool: ToolInfo, library_dir: impl Into<String>, out_dir: impl Into<String>) -> Self {
        Self {
            schema: crate::schema::MODFIX_REPORT_V1.to_string(),
            run_id: Uuid::new_v4(),
            tool,
            run: RunInfo {
                started_at: Some(Utc::now()),
                ..RunInfo::default()
            },
            library_dir: library_dir.into(),
            out_dir: out_dir.into(),
            converted: 0,
            skipped: 0,
            entries: vec![],
        }
    }

    /// Copy counters from a finished summary and stamp the end time.
    pub fn finish(&mut self, summary: &RunSummary) {
        self.converted = summary.converted;
        self.skipped = summary.skipped;
        self.run.ended_at = Some(Utc::now());
    }
}
