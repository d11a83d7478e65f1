//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/tasklist/`, `~/.cache/tasklist/`, `~/.local/share/tasklist/`
//! - macOS: `~/Library/Application Support/tasklist/`, `~/Library/Caches/tasklist/`
//! - Windows: `%APPDATA%\tasklist\`, `%LOCALAPPDATA%\tasklist\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "tasklist";
const STORE_FILE: &str = "store.json";

/// Get the application cache directory (log files)
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application data directory (persisted lists)
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine data directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to the default key-value store file
pub fn default_store_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(STORE_FILE))
}
