//! Configuration file loading for modfix.
//!
//! Discovers and loads `modfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use modfix_core::settings::ConvertSettings;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "modfix.toml";

/// Top-level configuration from modfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModfixConfig {
    /// Directory holding the source modules.
    pub library_dir: Option<Utf8PathBuf>,

    /// Directory converted modules are written to.
    pub out_dir: Option<Utf8PathBuf>,

    /// Extension given to converted files (without the dot).
    pub extension: Option<String>,

    /// Extra reserved names: source name -> destination name.
    pub renames: BTreeMap<String, String>,
}

/// Discover the modfix.toml config file in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a modfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ModfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ModfixConfig> {
    let config: ModfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<ModfixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(ModfixConfig::default()),
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ModfixConfig,
}

impl ConfigMerger {
    pub fn new(config: ModfixConfig) -> Self {
        Self { config }
    }

    /// CLI values win over the file; file values win over built-in defaults.
    pub fn merge_convert_args(
        self,
        cli_library_dir: Option<Utf8PathBuf>,
        cli_out_dir: Option<Utf8PathBuf>,
        cli_extension: Option<String>,
        dry_run: bool,
    ) -> ConvertSettings {
        let defaults = ConvertSettings::default();
        ConvertSettings {
            library_dir: cli_library_dir
                .or(self.config.library_dir)
                .unwrap_or(defaults.library_dir),
            out_dir: cli_out_dir
                .or(self.config.out_dir)
                .unwrap_or(defaults.out_dir),
            extension: cli_extension
                .or(self.config.extension)
                .unwrap_or(defaults.extension),
            dry_run,
            renames: self.config.renames,
        }
    }
}
