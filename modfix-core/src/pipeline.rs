//! The convert pipeline, extracted from the CLI.
//!
//! Files are processed one at a time, in name order: read, classify, rewrite, write. A shape
//! rejection is recorded and the run continues; any other error stops the run.

use crate::ports::{ProgressSink, SourceView, WritePort};
use crate::settings::{ConvertSettings, Target};
use anyhow::Context;
use modfix_domain::Rewriter;
use modfix_edit::{prepare_conversion, ConvertError, ConvertResult};
use modfix_types::outcome::{RunSummary, TransformOutcome};
use modfix_types::report::{ReportEntry, RunReport, ToolInfo};
use tracing::{debug, info, warn};

/// The final state of one file.
#[derive(Debug, Clone)]
pub struct FileConversion {
    pub name: String,
    pub outcome: TransformOutcome,
    pub entry: ReportEntry,
    /// Unified diff of the rewrite; only produced in dry-run mode.
    pub patch: Option<String>,
}

impl FileConversion {
    fn without_output(name: &str, outcome: TransformOutcome) -> Self {
        Self {
            name: name.to_string(),
            entry: ReportEntry {
                name: name.to_string(),
                outcome: outcome.clone(),
                source_sha256: None,
                destination_sha256: None,
                rule_hits: vec![],
            },
            outcome,
            patch: None,
        }
    }

    fn failed(name: &str, err: &ConvertError) -> Self {
        Self::without_output(
            name,
            TransformOutcome::Failed {
                error: err.to_string(),
            },
        )
    }
}

/// Outcome of a `run`.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub report: RunReport,
    /// Concatenated dry-run diffs; empty when files were written.
    pub patch: String,
}

/// Convert one module by name.
///
/// Returns `Ok` with a `Skipped` outcome for a shape rejection. I/O failures are `Err`.
pub fn convert_one(
    settings: &ConvertSettings,
    rewriter: &Rewriter,
    source: &dyn SourceView,
    writer: &dyn WritePort,
    name: &str,
) -> ConvertResult<FileConversion> {
    let conv = match prepare_conversion(rewriter, source, name, &settings.convert_options()) {
        Ok(conv) => conv,
        Err(ConvertError::Shape(rejection)) => {
            warn!(
                name,
                missing = ?rejection.missing,
                "skipped module that does not match expected shape"
            );
            return Ok(FileConversion::without_output(
                name,
                TransformOutcome::skipped(rejection.missing),
            ));
        }
        Err(err) => return Err(err),
    };

    let patch = if settings.dry_run {
        debug!(name, "dry-run: not written");
        Some(conv.patch()?)
    } else {
        writer
            .write_file(&conv.destination_path, &conv.result.text)
            .with_context(|| format!("write converted module {}", conv.destination_path))?;
        info!(
            name,
            destination = conv.destination_path.as_str(),
            "converted module"
        );
        None
    };

    let outcome = TransformOutcome::Converted {
        destination: conv.destination_path.clone(),
    };

    Ok(FileConversion {
        name: name.to_string(),
        entry: ReportEntry {
            name: name.to_string(),
            outcome: outcome.clone(),
            source_sha256: Some(conv.source_sha256),
            destination_sha256: Some(conv.destination_sha256),
            rule_hits: conv.result.rule_hits,
        },
        outcome,
        patch,
    })
}

/// Run the pipeline over `target`.
///
/// The progress sink sees every file as soon as it is final, including the one that failed.
pub fn run(
    settings: &ConvertSettings,
    target: &Target,
    source: &dyn SourceView,
    writer: &dyn WritePort,
    progress: &mut dyn ProgressSink,
    tool: ToolInfo,
) -> ConvertResult<RunOutcome> {
    let rewriter = settings.rewriter();
    let mut report = RunReport::new(
        tool,
        settings.library_dir.as_str(),
        settings.out_dir.as_str(),
    );
    report.run.dry_run = settings.dry_run;

    let names = match target {
        Target::All => source
            .list()
            .with_context(|| format!("list library directory {}", source.root()))?,
        Target::One(name) => vec![name.clone()],
    };
    debug!(count = names.len(), library = %source.root(), "modules to process");

    if !settings.dry_run {
        writer
            .create_dir_all(&settings.out_dir)
            .with_context(|| format!("create output directory {}", settings.out_dir))?;
    }

    let mut summary = RunSummary::default();
    let mut patch = String::new();
    for name in &names {
        let conv = match convert_one(settings, &rewriter, source, writer, name) {
            Ok(conv) => conv,
            Err(err) => {
                progress.on_file(&FileConversion::failed(name, &err));
                return Err(err);
            }
        };
        progress.on_file(&conv);

        if let Some(p) = &conv.patch {
            patch.push_str(p);
        }
        summary.record(conv.name, conv.outcome);
        report.entries.push(conv.entry);
    }

    report.finish(&summary);
    info!(
        converted = summary.converted,
        skipped = summary.skipped,
        "run complete"
    );

    Ok(RunOutcome {
        summary,
        report,
        patch,
    })
}

/// Convert every file in the library directory. Stops at the first runtime error.
pub fn rewrite_all(
    settings: &ConvertSettings,
    source: &dyn SourceView,
    writer: &dyn WritePort,
    progress: &mut dyn ProgressSink,
    tool: ToolInfo,
) -> ConvertResult<RunOutcome> {
    run(settings, &Target::All, source, writer, progress, tool)
}

/// Serialize a run report as pretty JSON through the write port.
pub fn write_report(
    report: &RunReport,
    path: &camino::Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    writer.write_file(path, json.as_bytes())
}
