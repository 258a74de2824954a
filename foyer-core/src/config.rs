use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{FoyerError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaConfig {
    /// Subtree of the asset tree that is servable. Empty means the tree root.
    #[serde(default = "default_asset_root")]
    pub asset_root: String,
    #[serde(default = "default_index_file")]
    pub index_file: String,
    /// Paths under this prefix are owned by the API router, never by the SPA.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_dev_proxy_url")]
    pub dev_proxy_url: String,
    #[serde(default = "default_dev_env_var")]
    pub dev_env_var: String,
    #[serde(default = "default_dev_env_value")]
    pub dev_env_value: String,
}

fn default_asset_root() -> String {
    String::new()
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_dev_proxy_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_dev_env_var() -> String {
    "ENV".to_string()
}

fn default_dev_env_value() -> String {
    "dev".to_string()
}

impl Default for SpaConfig {
    fn default() -> Self {
        Self {
            asset_root: default_asset_root(),
            index_file: default_index_file(),
            api_prefix: default_api_prefix(),
            dev_proxy_url: default_dev_proxy_url(),
            dev_env_var: default_dev_env_var(),
            dev_env_value: default_dev_env_value(),
        }
    }
}

impl SpaConfig {
    /// Whether the process should proxy frontend requests to a local dev
    /// server instead of serving embedded assets. Read once, at resolver
    /// construction.
    pub fn detect_dev_mode(&self) -> bool {
        std::env::var(&self.dev_env_var).as_deref() == Ok(self.dev_env_value.as_str())
    }
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    PathBuf::from("foyer.toml")
}

/// Load config from disk, returning defaults if the file doesn't exist.
pub fn load_config() -> Result<SpaConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(SpaConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    toml::from_str(&contents).map_err(|e| FoyerError::Config(e.to_string()))
}
