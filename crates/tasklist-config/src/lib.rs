//! Configuration and storage for tasklist
//!
//! This crate provides:
//! - Platform directories for config, cache and data files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)
//! - Key-value storage backends used to persist application state

pub mod app_config;
pub mod config_file;
pub mod kv_store;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use kv_store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use paths::{cache_dir, data_dir, default_store_path};
