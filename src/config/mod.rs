//! Configuration loading for docdex.

use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Configuration for the catalog location.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding index.json and the docs/ content tree.
    #[serde(default = "default_catalog_root")]
    pub root: String,
}

fn default_catalog_root() -> String {
    "~/.docdex".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: default_catalog_root(),
        }
    }
}

impl Config {
    /// Load config from `DOCDEX_CONFIG` or ~/.config/docdex/config.toml,
    /// falling back to defaults when neither file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var_os("DOCDEX_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::config_path);

        if let Some(path) = config_path
            && path.exists()
        {
            let contents = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            return Ok(config);
        }

        Ok(Config::default())
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "docdex").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// The catalog root with `~` expanded.
    #[must_use]
    pub fn catalog_root(&self) -> PathBuf {
        expand_tilde(&self.catalog.root)
    }
}

/// Expand ~ to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(base_dirs) = BaseDirs::new() {
            return base_dirs.home_dir().join(&path[2..]);
        }
    }
    PathBuf::from(path)
}
