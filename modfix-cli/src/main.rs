mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use modfix_core::adapters::{FsSourceView, FsWritePort};
use modfix_core::pipeline::{run, write_report, FileConversion};
use modfix_core::ports::{ProgressSink, WritePort};
use modfix_core::registry::{ModuleEntry, Registry};
use modfix_core::settings::Target;
use modfix_render::{render_file_line, render_report_md, render_rules, render_summary};
use modfix_types::outcome::FileRecord;
use modfix_types::report::ToolInfo;
use std::collections::BTreeMap;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for a single named module that was skipped for its shape.
const EXIT_SKIPPED: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "modfix",
    version,
    about = "Rewrites self-executing automation modules into importable entry functions."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert one module by name, or every module with `all`.
    Convert(ConvertArgs),
    /// List the replacement rules in the order they are applied.
    Rules,
    /// Explain a single replacement rule.
    Explain(ExplainArgs),
    /// Build the registry of converted modules and print it.
    Registry(RegistryArgs),
}

#[derive(Debug, Parser)]
struct ConvertArgs {
    /// Module name to convert, or `all` for the whole library directory.
    name: String,

    /// Directory holding the source modules (default: `library`, or modfix.toml).
    #[arg(long)]
    library_dir: Option<Utf8PathBuf>,

    /// Directory converted modules are written to (default: `newlibrary`, or modfix.toml).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Extension given to converted files (default: `py`, or modfix.toml).
    #[arg(long)]
    extension: Option<String>,

    /// Print the diff each conversion would produce instead of writing files.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a JSON run report to this path, with a markdown summary next to it.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule id to explain (e.g. "thread-params").
    rule_id: String,
}

#[derive(Debug, Parser)]
struct RegistryArgs {
    /// Directory of converted modules (default: `newlibrary`, or modfix.toml).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Rules => cmd_rules(),
        Command::Explain(args) => cmd_explain(args),
        Command::Registry(args) => cmd_registry(args),
    }
}

/// Prints one line per file as the pipeline reports it.
struct ConsoleProgress {
    dry_run: bool,
}

impl ProgressSink for ConsoleProgress {
    fn on_file(&mut self, conversion: &FileConversion) {
        let record = FileRecord {
            name: conversion.name.clone(),
            outcome: conversion.outcome.clone(),
        };
        println!("{}", render_file_line(&record, self.dry_run));
        if let Some(patch) = &conversion.patch {
            print!("{}", patch);
        }
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<ExitCode> {
    let target = Target::parse(&args.name);
    let report_md = args.report.as_deref().map(markdown_sibling).transpose()?;

    let file_config = config::load_or_default(Utf8Path::new(".")).context("load modfix.toml")?;
    let settings = ConfigMerger::new(file_config).merge_convert_args(
        args.library_dir,
        args.out_dir,
        args.extension,
        args.dry_run,
    );
    debug!(
        "merged config: library_dir={}, out_dir={}, extension={}, renames={:?}",
        settings.library_dir, settings.out_dir, settings.extension, settings.renames
    );

    let source = FsSourceView::new(settings.library_dir.clone());
    let writer = FsWritePort;
    let mut progress = ConsoleProgress {
        dry_run: settings.dry_run,
    };

    let outcome = match run(
        &settings,
        &target,
        &source,
        &writer,
        &mut progress,
        tool_info(),
    ) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("{:?}", err);
            return Ok(ExitCode::from(err.exit_code()));
        }
    };

    println!("{}", render_summary(&outcome.summary));

    if let (Some(path), Some(md_path)) = (&args.report, &report_md) {
        write_report(&outcome.report, path, &writer)
            .with_context(|| format!("write report {}", path))?;
        writer
            .write_file(md_path, render_report_md(&outcome.report).as_bytes())
            .with_context(|| format!("write {}", md_path))?;
        info!("wrote report to {}", path);
    }

    let single_skipped = matches!(target, Target::One(_)) && outcome.summary.skipped > 0;
    if single_skipped {
        return Ok(ExitCode::from(EXIT_SKIPPED));
    }
    Ok(ExitCode::SUCCESS)
}

/// Path of the markdown summary written next to a JSON report.
fn markdown_sibling(report: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    if report.extension() == Some("md") {
        anyhow::bail!(
            "report path {} collides with its markdown summary; use a .json path",
            report
        );
    }
    Ok(report.with_extension("md"))
}

fn cmd_rules() -> anyhow::Result<ExitCode> {
    print!("{}", render_rules(&modfix_domain::builtin_rules()));
    println!();
    println!("Use 'modfix explain <rule-id>' for details.");
    Ok(ExitCode::SUCCESS)
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<ExitCode> {
    use explain::{list_rule_ids, lookup_rule, render_explanation};

    let Some(rule) = lookup_rule(&args.rule_id) else {
        let available = list_rule_ids().join(", ");
        anyhow::bail!(
            "Unknown rule id: '{}'\n\nAvailable rules: {}",
            args.rule_id,
            available
        );
    };

    print!("{}", render_explanation(&rule));
    Ok(ExitCode::SUCCESS)
}

fn cmd_registry(args: RegistryArgs) -> anyhow::Result<ExitCode> {
    let file_config = config::load_or_default(Utf8Path::new(".")).context("load modfix.toml")?;
    let settings =
        ConfigMerger::new(file_config).merge_convert_args(None, args.out_dir, None, false);

    let registry = Registry::build(&settings.out_dir, &settings.extension)
        .with_context(|| format!("build registry from {}", settings.out_dir))?;

    match args.format {
        OutputFormat::Text => {
            for (name, entry) in registry.entries() {
                match entry {
                    ModuleEntry::Available { path, .. } => {
                        println!("  {:<24} available    {}", name, path);
                    }
                    ModuleEntry::Unavailable { reason, .. } => {
                        println!("  {:<24} unavailable  {}", name, reason);
                    }
                }
            }
            println!();
            println!(
                "{} modules, {} available",
                registry.len(),
                registry.available_count()
            );
        }
        OutputFormat::Json => {
            let modules: BTreeMap<_, _> = registry.entries().collect();
            let doc = serde_json::json!({
                "schema": modfix_types::schema::MODFIX_REGISTRY_V1,
                "out_dir": settings.out_dir,
                "modules": modules,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "modfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn markdown_summary_sits_next_to_json_report() {
        assert_eq!(
            markdown_sibling(Utf8Path::new("out/run.json")).unwrap(),
            Utf8PathBuf::from("out/run.md")
        );
        assert_eq!(
            markdown_sibling(Utf8Path::new("run")).unwrap(),
            Utf8PathBuf::from("run.md")
        );
    }

    #[test]
    fn markdown_report_path_is_rejected() {
        let err = markdown_sibling(Utf8Path::new("run.md")).unwrap_err();
        assert!(err.to_string().contains("run.md"));
    }
}
