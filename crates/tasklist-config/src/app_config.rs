//! Application configuration
//!
//! Configuration loaded from .tasklist.toml file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from .tasklist.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// File backing the key-value store (defaults to the platform data dir)
    #[serde(default)]
    pub storage_path: Option<String>,

    /// Key under which the application state snapshot is stored
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// How long the loading screen stays up before the first real screen
    #[serde(default)]
    pub loading_delay_ms: u64,
}

fn default_storage_key() -> String {
    "appState".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            storage_key: default_storage_key(),
            loading_delay_ms: 0,
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Resolve the file backing the key-value store
    pub fn resolved_storage_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => crate::default_store_path(),
        }
    }
}
