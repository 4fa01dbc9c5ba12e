//! Rule explanations for the `modfix explain` command.

use modfix_domain::{builtin_rules, Rule};
use modfix_types::marker::Marker;

/// Find a built-in rule by id, accepting `_` in place of `-`.
pub fn lookup_rule(query: &str) -> Option<Rule> {
    let normalized = query.trim().to_ascii_lowercase().replace('_', "-");
    builtin_rules().into_iter().find(|r| r.id == normalized)
}

pub fn list_rule_ids() -> Vec<&'static str> {
    builtin_rules().into_iter().map(|r| r.id).collect()
}

/// Position of the rule in application order, 1-based.
pub fn rule_position(id: &str) -> Option<usize> {
    builtin_rules().iter().position(|r| r.id == id).map(|i| i + 1)
}

/// The marker a rule consumes, if its pattern is one of the shape markers.
pub fn consumed_marker(rule: &Rule) -> Option<Marker> {
    Marker::ALL.into_iter().find(|m| m.literal() == rule.find)
}

pub fn render_explanation(rule: &Rule) -> String {
    let mut out = String::new();
    out.push_str(&format!("RULE: {}\n\n", rule.id));
    if let Some(pos) = rule_position(rule.id) {
        out.push_str(&format!("Order:   {} of {}\n", pos, builtin_rules().len()));
    }
    out.push_str(&format!("Find:    {:?}\n", rule.find));
    out.push_str(&format!("Replace: {:?}\n", rule.replace));
    if let Some(marker) = consumed_marker(rule) {
        out.push_str(&format!("Marker:  {}\n", marker.label()));
    }
    out.push('\n');
    out.push_str(rule.purpose);
    out.push('\n');
    out
}
