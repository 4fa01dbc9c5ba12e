use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::warn;

/// Read-only access to a library of source modules, keyed by file name.
///
/// modfix-domain uses this so the pipeline can run against an in-memory implementation.
pub trait SourceView {
    fn root(&self) -> &Utf8Path;

    /// File names of every regular file, sorted.
    fn list(&self) -> anyhow::Result<Vec<String>>;

    /// Raw contents of one module. No encoding is assumed.
    fn read(&self, name: &str) -> anyhow::Result<Vec<u8>>;
}

/// File-system backed `SourceView`.
#[derive(Debug, Clone)]
pub struct FsSourceView {
    root: Utf8PathBuf,
}

impl FsSourceView {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }
}

impl SourceView for FsSourceView {
    fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn list(&self) -> anyhow::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry.with_context(|| format!("list {}", self.root))?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(
                    library = %self.root,
                    file = ?raw,
                    "ignoring file whose name is not UTF-8"
                ),
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let abs = self.root.join(name);
        fs::read(&abs).with_context(|| format!("read {}", abs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_files_sorted_and_skips_dirs() {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
        std::fs::write(root.join("yum"), "y").unwrap();
        std::fs::write(root.join("apt"), "a").unwrap();
        std::fs::create_dir(root.join("nested")).unwrap();

        let view = FsSourceView::new(root);
        assert_eq!(view.list().unwrap(), vec!["apt", "yum"]);
        assert_eq!(view.read("apt").unwrap(), b"a");
    }

    #[test]
    fn reads_non_utf8_contents_verbatim() {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
        std::fs::write(root.join("apt"), b"# Jos\xe9\n").unwrap();

        let view = FsSourceView::new(root);
        assert_eq!(view.read("apt").unwrap(), b"# Jos\xe9\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_names_are_left_out_of_the_listing() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
        std::fs::write(root.join("ping"), "p").unwrap();
        std::fs::write(td.path().join(OsStr::from_bytes(b"caf\xe9")), "c").unwrap();

        let view = FsSourceView::new(root);
        assert_eq!(view.list().unwrap(), vec!["ping"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).expect("utf8");
        let err = FsSourceView::new(root).read("nope").unwrap_err();
        assert!(format!("{err:#}").contains("nope"));
    }
}
