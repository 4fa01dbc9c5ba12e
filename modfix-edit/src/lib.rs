//! Conversion engine for modfix.
//!
//! Responsibilities:
//! - Read one source module through a `SourceView` and run it through the `Rewriter`.
//! - Resolve the destination path (reserved-name rename plus extension).
//! - Hash source and destination bytes and render a unified diff preview.
//!
//! Module contents are handled as bytes throughout; nothing requires them to be UTF-8.
//!
//! Writing is left to the caller so the same conversion can be previewed or persisted.

pub mod error;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use modfix_domain::{Rewriter, SourceView};
use modfix_types::module::{SourceModule, TransformResult};
use sha2::{Digest, Sha256};
use tracing::debug;

pub use error::{ConvertError, ConvertResult};

/// Extension given to destination files unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = "py";

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub out_dir: Utf8PathBuf,
    pub extension: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            out_dir: Utf8PathBuf::from("newlibrary"),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// A rewritten module that has not been written yet.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub name: String,
    pub destination_path: Utf8PathBuf,
    pub original: Vec<u8>,
    pub result: TransformResult,
    pub source_sha256: String,
    pub destination_sha256: String,
}

impl Conversion {
    /// Unified diff between the original and the rewritten text.
    pub fn patch(&self) -> anyhow::Result<String> {
        render_patch(
            Utf8Path::new(&self.name),
            &self.destination_path,
            &self.original,
            &self.result.text,
        )
    }
}

/// Read, classify and rewrite one module.
///
/// A read failure is a runtime error; a missing marker is a shape rejection. Nothing is written.
pub fn prepare_conversion(
    rewriter: &Rewriter,
    source: &dyn SourceView,
    name: &str,
    opts: &ConvertOptions,
) -> ConvertResult<Conversion> {
    let text = source
        .read(name)
        .with_context(|| format!("read source module {name}"))?;
    let module = SourceModule::new(name, text);

    let result = rewriter.transform(&module)?;
    let destination_path = destination_path(&opts.out_dir, &result.destination, &opts.extension);
    debug!(
        name,
        destination = destination_path.as_str(),
        "prepared conversion"
    );

    Ok(Conversion {
        name: name.to_string(),
        source_sha256: sha256_hex(module.text()),
        destination_sha256: sha256_hex(&result.text),
        destination_path,
        original: module.text().to_vec(),
        result,
    })
}

/// `<out_dir>/<destination>.<extension>`; an empty extension adds no dot.
pub fn destination_path(out_dir: &Utf8Path, destination: &str, extension: &str) -> Utf8PathBuf {
    if extension.is_empty() {
        out_dir.join(destination)
    } else {
        out_dir.join(format!("{destination}.{extension}"))
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Render a git-style unified diff from the source file to its destination.
///
/// The diff is computed on bytes; bytes that are not UTF-8 show as replacement characters.
pub fn render_patch(
    from: &Utf8Path,
    to: &Utf8Path,
    old: &[u8],
    new: &[u8],
) -> anyhow::Result<String> {
    if old == new {
        return Ok(String::new());
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{from} b/{to}\n"));
    out.push_str(&format!("--- a/{from}\n+++ b/{to}\n"));

    let formatter = PatchFormatter::new();
    let patch = diffy::create_patch_bytes(old, new);
    let mut raw = Vec::new();
    formatter
        .write_patch_into(&patch, &mut raw)
        .context("format patch")?;
    let body = String::from_utf8_lossy(&raw);
    // diffy repeats its own ---/+++ header; keep only the hunks.
    for line in body.lines().skip_while(|l| !l.starts_with("@@")) {
        out.push_str(line);
        out.push('\n');
    }

    Ok(out)
}
