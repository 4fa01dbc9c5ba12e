//! Rendering helpers for human-readable output.

use modfix_domain::Rule;
use modfix_types::outcome::{FileRecord, RunSummary, TransformOutcome};
use modfix_types::report::RunReport;

/// One line per file, as printed while a run progresses.
pub fn render_file_line(record: &FileRecord, dry_run: bool) -> String {
    match &record.outcome {
        TransformOutcome::Converted { destination } if dry_run => {
            format!("would write {:?}", destination.as_str())
        }
        TransformOutcome::Converted { destination } => format!("wrote {:?}", destination.as_str()),
        TransformOutcome::Skipped { missing, .. } => {
            let mut line = format!("skipped {:?} because it looks strange", record.name);
            if !missing.is_empty() {
                let labels: Vec<_> = missing.iter().map(|m| m.label()).collect();
                line.push_str(&format!(" (missing: {})", labels.join(", ")));
            }
            line
        }
        TransformOutcome::Failed { error } => format!("failed {:?}: {}", record.name, error),
    }
}

pub fn render_summary(summary: &RunSummary) -> String {
    format!(
        "done: converted={} skipped={}",
        summary.converted, summary.skipped
    )
}

pub fn render_report_md(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("# modfix run\n\n");
    out.push_str(&format!("- Library: `{}`\n", report.library_dir));
    out.push_str(&format!("- Output: `{}`\n", report.out_dir));
    out.push_str(&format!("- Converted: {}\n", report.converted));
    out.push_str(&format!("- Skipped: {}\n", report.skipped));
    if report.run.dry_run {
        out.push_str("- Mode: dry-run\n");
    }
    out.push('\n');

    out.push_str("## Modules\n\n");
    if report.entries.is_empty() {
        out.push_str("_No modules processed._\n");
        return out;
    }

    out.push_str("| Module | Status | Destination | Replacements |\n");
    out.push_str("|---|---|---|---|\n");
    for e in &report.entries {
        let (status, dest) = match &e.outcome {
            TransformOutcome::Converted { destination } => ("converted", destination.to_string()),
            TransformOutcome::Skipped { .. } => ("skipped", "-".to_string()),
            TransformOutcome::Failed { .. } => ("failed", "-".to_string()),
        };
        let hits: u64 = e.rule_hits.iter().map(|h| h.count).sum();
        out.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            e.name, status, dest, hits
        ));
    }

    out
}

/// Numbered listing of the rule list, in application order.
pub fn render_rules(rules: &[Rule]) -> String {
    let mut out = String::new();
    for (i, rule) in rules.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, rule.id));
        out.push_str(&format!("    find:    {:?}\n", rule.find));
        out.push_str(&format!("    replace: {:?}\n", rule.replace));
        out.push_str(&format!("    {}\n", rule.purpose));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use modfix_types::marker::Marker;
    use modfix_types::report::{ReportEntry, ToolInfo};
    use pretty_assertions::assert_eq;

    fn converted(name: &str, dest: &str) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            outcome: TransformOutcome::Converted {
                destination: dest.into(),
            },
        }
    }

    #[test]
    fn converted_line() {
        assert_eq!(
            render_file_line(&converted("apt", "newlibrary/apt.py"), false),
            "wrote \"newlibrary/apt.py\""
        );
        assert_eq!(
            render_file_line(&converted("apt", "newlibrary/apt.py"), true),
            "would write \"newlibrary/apt.py\""
        );
    }

    #[test]
    fn skipped_line_lists_missing_markers() {
        let record = FileRecord {
            name: "odd".to_string(),
            outcome: TransformOutcome::skipped(vec![Marker::Boilerplate, Marker::Invocation]),
        };
        assert_eq!(
            render_file_line(&record, false),
            "skipped \"odd\" because it looks strange (missing: boilerplate, invocation)"
        );
    }

    #[test]
    fn summary_line() {
        let summary = RunSummary {
            converted: 3,
            skipped: 2,
            files: vec![],
        };
        assert_eq!(render_summary(&summary), "done: converted=3 skipped=2");
    }

    #[test]
    fn report_md_has_table_row_per_entry() {
        let mut report = RunReport::new(
            ToolInfo {
                name: "modfix".to_string(),
                version: None,
            },
            "library",
            "newlibrary",
        );
        report.entries.push(ReportEntry {
            name: "odd".to_string(),
            outcome: TransformOutcome::skipped(vec![Marker::Signature]),
            source_sha256: None,
            destination_sha256: None,
            rule_hits: vec![],
        });
        let md = render_report_md(&report);
        assert!(md.contains("| `odd` | skipped | - | 0 |"));
    }

    #[test]
    fn rules_listing_is_numbered_in_order() {
        let text = render_rules(&modfix_domain::builtin_rules());
        let first = text.find(" 1. include-common").expect("first rule");
        let last = text.find("12. print-on-exit-0").expect("last rule");
        assert!(first < last);
    }
}
