//! Default filesystem-backed port implementations, plus in-memory ones for embedding and tests.

use crate::ports::{SourceView, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::collections::BTreeMap;

pub use modfix_domain::FsSourceView;

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}

/// In-memory source library, listed in name order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceView {
    root: Utf8PathBuf,
    files: BTreeMap<String, Vec<u8>>,
}

impl InMemorySourceView {
    pub fn new<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self {
            root: Utf8PathBuf::from("library"),
            files: files
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl SourceView for InMemorySourceView {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn list(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("read {}: no such module", self.root.join(name)))
    }
}

/// Records writes instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryWritePort {
    files: RefCell<BTreeMap<Utf8PathBuf, Vec<u8>>>,
    dirs: RefCell<Vec<Utf8PathBuf>>,
}

impl InMemoryWritePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> BTreeMap<Utf8PathBuf, Vec<u8>> {
        self.files.borrow().clone()
    }

    pub fn written_string(&self, path: &Utf8Path) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn dirs(&self) -> Vec<Utf8PathBuf> {
        self.dirs.borrow().clone()
    }
}

impl WritePort for InMemoryWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        self.dirs.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
