//! Configuration file and environment handling.
//!
//! ```toml
//! # ~/.config/directive-ref/config.toml
//! dataset = "~/nginx/reference.json"
//! top_level_context = "main"
//! ```

use crate::error::Result;
use crate::highlight::DEFAULT_TOP_LEVEL_CONTEXT;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Path to a config file, overriding the default location.
pub const CONFIG_ENV: &str = "DIRECTIVE_REF_CONFIG";
/// Path to a dataset file, overriding the config file.
pub const DATASET_ENV: &str = "DIRECTIVE_REF_DATASET";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dataset JSON file; the bundled dataset is used when unset.
    pub dataset: Option<PathBuf>,
    /// Context that marks a directive as top-level for highlighting.
    pub top_level_context: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            top_level_context: DEFAULT_TOP_LEVEL_CONTEXT.to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.dataset = config.dataset.map(|p| expand_path(&p));
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Load configuration from the environment and the default config location.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let dataset = std::env::var(DATASET_ENV).ok();
        Self::resolve(explicit, dataset)
    }

    /// Resolution order: explicit config file, then the default location if it
    /// exists, then built-in defaults. `dataset_override` wins over the file.
    pub fn resolve(explicit: Option<PathBuf>, dataset_override: Option<String>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_path(&path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => {
                    tracing::debug!("Using config at {}", path.display());
                    Self::from_path(&path)?
                }
                None => Self::default(),
            },
        };

        if let Some(dataset) = dataset_override.filter(|d| !d.trim().is_empty()) {
            config.dataset = Some(PathBuf::from(expand_tilde(dataset.trim()).as_ref()));
        }

        Ok(config)
    }
}

/// `<config_dir>/directive-ref/config.toml`, when a config dir is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("directive-ref").join("config.toml"))
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(expand_tilde(s).as_ref()),
        None => path.to_path_buf(),
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
