use serde::{Deserialize, Serialize};

/// A source file read from the library directory.
///
/// The contents are raw bytes and are never mutated; every run reads them fresh. Modules are not
/// required to be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    name: String,
    text: Vec<u8>,
}

impl SourceModule {
    pub fn new(name: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// File name within the library directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }
}

/// How many replacements a single rule performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHit {
    pub rule_id: String,
    pub count: u64,
}

/// The derived product of a successful rewrite. Written once, never persisted by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// Destination module name, without extension.
    pub destination: String,
    pub text: Vec<u8>,
    pub rule_hits: Vec<RuleHit>,
}

impl TransformResult {
    /// Total replacements across all rules.
    pub fn total_hits(&self) -> u64 {
        self.rule_hits.iter().map(|h| h.count).sum()
    }
}
