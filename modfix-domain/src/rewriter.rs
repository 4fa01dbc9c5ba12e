use crate::classify::{missing_markers, ShapeRejection};
use crate::rename::RenamePolicy;
use crate::rules::RuleSet;
use modfix_types::module::{SourceModule, TransformResult};
use tracing::debug;

/// Classifies and rewrites source modules. Pure: no I/O, same input text gives the same output.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: RuleSet,
    renames: RenamePolicy,
}

impl Rewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleSet, renames: RenamePolicy) -> Self {
        Self { rules, renames }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn renames(&self) -> &RenamePolicy {
        &self.renames
    }

    pub fn classify(&self, text: impl AsRef<[u8]>) -> bool {
        crate::classify::classify(text)
    }

    /// Apply the rule list without checking shape.
    pub fn rewrite(&self, text: impl AsRef<[u8]>) -> Vec<u8> {
        self.rules.apply(text).0
    }

    /// Shape check, rewrite and rename in one step. Nothing partial is ever returned.
    pub fn transform(&self, module: &SourceModule) -> Result<TransformResult, ShapeRejection> {
        let missing = missing_markers(module.text());
        if !missing.is_empty() {
            return Err(ShapeRejection {
                name: module.name().to_string(),
                missing,
            });
        }

        let (text, rule_hits) = self.rules.apply(module.text());
        let destination = self.renames.destination_name(module.name());
        debug!(
            name = module.name(),
            destination = destination.as_str(),
            "rewrote module"
        );

        Ok(TransformResult {
            destination,
            text,
            rule_hits,
        })
    }
}
