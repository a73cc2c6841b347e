//! Configuration loading and parsing for superpip.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use superpip::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".superpip");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "settings:\n  offline: true\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(config.settings.offline);
//! ```
//!
//! # Configuration File Locations
//!
//! superpip discovers and merges configuration in this order:
//! 1. User global config (`~/.superpip/config.yml`)
//! 2. Project config (`.superpip/config.yml`)
//! 3. An explicit `--config` file

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    load_config, load_config_value, load_from_paths, parse_config, ConfigPaths, CONFIG_DIR,
    CONFIG_FILE,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::{Settings, SuperpipConfig, DEFAULT_INDEX_URL};
