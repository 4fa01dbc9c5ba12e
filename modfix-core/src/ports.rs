//! Port traits abstracting all I/O away from the pipeline.

use crate::pipeline::FileConversion;
use camino::Utf8Path;

pub use modfix_domain::SourceView;

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}

/// Receives each file's outcome as soon as it is final, before the next file is read.
pub trait ProgressSink {
    fn on_file(&mut self, conversion: &FileConversion);
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_file(&mut self, _conversion: &FileConversion) {}
}
