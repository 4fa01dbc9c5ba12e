//! Clap-free settings for the convert pipeline.

use camino::Utf8PathBuf;
use modfix_domain::{RenamePolicy, Rewriter, RuleSet};
use modfix_edit::{ConvertOptions, DEFAULT_EXTENSION};
use std::collections::BTreeMap;

/// Sentinel accepted in place of a module name to convert the whole library.
pub const ALL_SENTINEL: &str = "all";

/// What a `convert` invocation should process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    All,
    One(String),
}

impl Target {
    pub fn parse(arg: &str) -> Self {
        if arg == ALL_SENTINEL {
            Target::All
        } else {
            Target::One(arg.to_string())
        }
    }
}

/// Settings for the convert pipeline.
#[derive(Debug, Clone)]
pub struct ConvertSettings {
    pub library_dir: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,
    pub extension: String,
    pub dry_run: bool,

    /// Extra reserved names, on top of the built-in ones.
    pub renames: BTreeMap<String, String>,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            library_dir: Utf8PathBuf::from("library"),
            out_dir: Utf8PathBuf::from("newlibrary"),
            extension: DEFAULT_EXTENSION.to_string(),
            dry_run: false,
            renames: BTreeMap::new(),
        }
    }
}

impl ConvertSettings {
    pub fn rewriter(&self) -> Rewriter {
        let mut renames = RenamePolicy::default();
        renames.extend(self.renames.clone());
        Rewriter::with_rules(RuleSet::builtin(), renames)
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            out_dir: self.out_dir.clone(),
            extension: self.extension.clone(),
        }
    }
}
