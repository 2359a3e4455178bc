use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Codepage of the original client files (IBM PC / OEM United States).
pub const DEFAULT_CODEPAGE: &str = "437";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Flat item tables, read in order.
    pub item_db_paths: Vec<PathBuf>,
    /// Item-info script to update.
    pub script_path: PathBuf,
    /// Where the updated script is written.
    pub output_script_path: PathBuf,
    /// TSV dump of the updated script records.
    #[serde(default)]
    pub output_tsv_path: Option<PathBuf>,
    /// TSV dump of the flat item table.
    #[serde(default)]
    pub flat_tsv_path: Option<PathBuf>,
    #[serde(default = "default_codepage")]
    pub codepage: String,
}

fn default_codepage() -> String {
    DEFAULT_CODEPAGE.to_string()
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in every configured path
        config.expand_paths();

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/iteminfo-reconcile");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_paths(&mut self) {
        for path in &mut self.item_db_paths {
            *path = expand_or_keep(path);
        }
        self.script_path = expand_or_keep(&self.script_path);
        self.output_script_path = expand_or_keep(&self.output_script_path);
        self.output_tsv_path = self.output_tsv_path.as_deref().map(expand_or_keep);
        self.flat_tsv_path = self.flat_tsv_path.as_deref().map(expand_or_keep);
    }
}

/// Expands `~` and environment variables, leaving the path unchanged when a
/// variable is undefined.
pub fn expand_path(path: &Path) -> Option<PathBuf> {
    let path_str = path.to_string_lossy();
    match shellexpand::full(&path_str) {
        Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
        Err(_) => None,
    }
}

fn expand_or_keep(path: &Path) -> PathBuf {
    expand_path(path).unwrap_or_else(|| path.to_path_buf())
}
