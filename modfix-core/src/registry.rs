//! Registry of converted modules.
//!
//! Built once from an output directory. Every converted file maps to either an available entry
//! or an unavailable one carrying the reason; the reason only surfaces when the name is resolved.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use memchr::memmem;
use modfix_domain::{builtin_rules, count_matches, replace_all};
use modfix_edit::sha256_hex;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Support files that live in the output directory but are not modules.
pub const NON_MODULE_STEMS: &[&str] = &["__init__", "newcommon"];

/// Entry point every converted module must expose.
pub const ENTRY_SIGNATURE: &str = "def main(**params):";

const EXIT_CALL: &str = "sys.exit(";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModuleEntry {
    Available { path: Utf8PathBuf, sha256: String },
    Unavailable { path: Utf8PathBuf, reason: String },
}

impl ModuleEntry {
    pub fn is_available(&self) -> bool {
        matches!(self, ModuleEntry::Available { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no module named '{name}' in the registry")]
    NotFound { name: String },

    #[error("module '{name}' is unavailable: {reason}")]
    Unavailable { name: String, reason: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    entries: BTreeMap<String, ModuleEntry>,
}

impl Registry {
    /// Scan `out_dir` for `*.<extension>` files and classify each one.
    ///
    /// A file that cannot be read fails the whole build; a file that reads but would not load is
    /// stored as unavailable.
    pub fn build(out_dir: &Utf8Path, extension: &str) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let suffix = format!(".{extension}");

        for entry in fs::read_dir(out_dir)? {
            let entry = entry.with_context(|| format!("list {}", out_dir))?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(stem) = file_name.strip_suffix(&suffix) else {
                continue;
            };
            if NON_MODULE_STEMS.contains(&stem) {
                continue;
            }

            let path = out_dir.join(&file_name);
            let text = fs::read(&path).with_context(|| format!("read {}", path))?;
            let module = classify_loadable(path, &text);
            debug!(name = stem, available = module.is_available(), "module registered");
            entries.insert(stem.to_string(), module);
        }

        Ok(Self { entries })
    }

    pub fn from_entries(entries: BTreeMap<String, ModuleEntry>) -> Self {
        Self { entries }
    }

    /// The entry for `name`, if it is available.
    pub fn resolve(&self, name: &str) -> Result<&ModuleEntry, RegistryError> {
        match self.entries.get(name) {
            Some(entry @ ModuleEntry::Available { .. }) => Ok(entry),
            Some(ModuleEntry::Unavailable { reason, .. }) => Err(RegistryError::Unavailable {
                name: name.to_string(),
                reason: reason.clone(),
            }),
            None => Err(RegistryError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ModuleEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_available()).count()
    }
}

/// Decide whether a converted module could be imported without terminating its host.
pub fn classify_loadable(path: Utf8PathBuf, text: &[u8]) -> ModuleEntry {
    if memmem::find(text, ENTRY_SIGNATURE.as_bytes()).is_none() {
        return ModuleEntry::Unavailable {
            path,
            reason: "entry point `main(**params)` not found".to_string(),
        };
    }

    let residual = residual_exit_calls(text);
    if residual > 0 {
        return ModuleEntry::Unavailable {
            path,
            reason: format!("{residual} process-terminating sys.exit call(s) remain"),
        };
    }

    ModuleEntry::Available {
        path,
        sha256: sha256_hex(text),
    }
}

/// `sys.exit(` calls left over after the exit-status rules, ignoring their own replacement text.
pub fn residual_exit_calls(text: &[u8]) -> usize {
    let mut scrubbed = text.to_vec();
    for rule in builtin_rules() {
        if rule.find.starts_with(EXIT_CALL) {
            scrubbed = replace_all(&scrubbed, rule.replace.as_bytes(), b"").0;
        }
    }
    count_matches(&scrubbed, EXIT_CALL.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn build_does_not_warn_about_unavailable_modules() {
        let td = tempfile::tempdir().unwrap();
        let out = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
        std::fs::write(out.join("broken.py"), "def main(**params):\n    sys.exit(3)\n").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let registry =
            tracing::subscriber::with_default(subscriber, || Registry::build(&out, "py")).unwrap();

        assert!(captured.0.lock().unwrap().is_empty());
        assert_eq!(registry.available_count(), 0);
        assert!(matches!(
            registry.resolve("broken"),
            Err(RegistryError::Unavailable { .. })
        ));
    }

    #[test]
    fn non_utf8_module_is_hashed_as_written() {
        let td = tempfile::tempdir().unwrap();
        let out = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
        let text = b"# Jos\xe9\ndef main(**params):\n    pass\n";
        std::fs::write(out.join("apt.py"), text).unwrap();

        let registry = Registry::build(&out, "py").unwrap();
        match registry.resolve("apt").unwrap() {
            ModuleEntry::Available { sha256, .. } => assert_eq!(sha256, &sha256_hex(text)),
            other => panic!("expected available, got {other:?}"),
        }
    }

    #[test]
    fn rewritten_exits_are_not_residual() {
        let text = "def main(**params):\n    raise Exception('was going to call sys.exit(1)') #XXX\n    print 'OK, was going to call sys.exit(0)' #XXX\n";
        assert_eq!(residual_exit_calls(text.as_bytes()), 0);
        assert!(classify_loadable("a.py".into(), text.as_bytes()).is_available());
    }

    #[test]
    fn other_exit_codes_are_residual() {
        let text = "def main(**params):\n    sys.exit(rc)\n";
        assert_eq!(residual_exit_calls(text.as_bytes()), 1);
        match classify_loadable("a.py".into(), text.as_bytes()) {
            ModuleEntry::Unavailable { reason, .. } => assert!(reason.contains("sys.exit")),
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[test]
    fn missing_entry_point_is_unavailable() {
        let entry = classify_loadable("a.py".into(), b"def main():\n    pass\n");
        assert!(!entry.is_available());
    }

    #[test]
    fn resolve_distinguishes_missing_and_unavailable() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "ok".to_string(),
            ModuleEntry::Available {
                path: "ok.py".into(),
                sha256: "00".to_string(),
            },
        );
        entries.insert(
            "bad".to_string(),
            ModuleEntry::Unavailable {
                path: "bad.py".into(),
                reason: "entry point `main(**params)` not found".to_string(),
            },
        );
        let reg = Registry::from_entries(entries);

        assert!(reg.resolve("ok").is_ok());
        assert_eq!(
            reg.resolve("bad").unwrap_err(),
            RegistryError::Unavailable {
                name: "bad".to_string(),
                reason: "entry point `main(**params)` not found".to_string(),
            }
        );
        assert!(matches!(
            reg.resolve("ghost"),
            Err(RegistryError::NotFound { .. })
        ));
        assert_eq!(reg.available_count(), 1);
    }
}
