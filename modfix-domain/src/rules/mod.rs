//! The ordered rewrite rule list.
//!
//! Each rule is a literal (find, replace) pair applied as one replace-all pass over the output of
//! the rule before it. Position in the list is part of a rule's meaning: several rules only work
//! because an earlier rule already removed or protected the text a later one would otherwise match.
//!
//! Matching is done on bytes. Every pattern is ASCII, so modules in any ASCII-compatible encoding
//! rewrite the same way and bytes outside the patterns pass through untouched.

use memchr::memmem;
use modfix_types::module::RuleHit;

mod entry;
mod exit_report;
mod exit_status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Stable kebab-case identifier, used in reports.
    pub id: &'static str,
    pub find: &'static str,
    pub replace: &'static str,
    /// One line on what the rule achieves and what it relies on.
    pub purpose: &'static str,
}

impl Rule {
    /// Apply this rule once over `text`. Returns the new text and the number of replacements.
    pub fn apply(&self, text: &[u8]) -> (Vec<u8>, u64) {
        replace_all(text, self.find.as_bytes(), self.replace.as_bytes())
    }
}

/// Replace every non-overlapping occurrence of `find`, scanning left to right.
pub fn replace_all(text: &[u8], find: &[u8], replace: &[u8]) -> (Vec<u8>, u64) {
    let mut out = Vec::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;
    for pos in memmem::find_iter(text, find) {
        out.extend_from_slice(&text[last..pos]);
        out.extend_from_slice(replace);
        last = pos + find.len();
        count += 1;
    }
    out.extend_from_slice(&text[last..]);
    (out, count)
}

/// Non-overlapping occurrences of `needle` in `text`.
pub fn count_matches(text: &[u8], needle: &[u8]) -> usize {
    memmem::find_iter(text, needle).count()
}

/// An ordered, non-backtracking list of rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order. Hits are reported for every rule, including zero counts.
    pub fn apply(&self, text: impl AsRef<[u8]>) -> (Vec<u8>, Vec<RuleHit>) {
        let mut current = text.as_ref().to_vec();
        let mut hits = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let (next, count) = rule.apply(&current);
            current = next;
            hits.push(RuleHit {
                rule_id: rule.id.to_string(),
                count,
            });
        }
        (current, hits)
    }
}

/// The full rule list, in application order.
pub fn builtin_rules() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend_from_slice(entry::RULES);
    rules.extend_from_slice(exit_report::RULES);
    rules.extend_from_slice(exit_status::RULES);
    rules
}
