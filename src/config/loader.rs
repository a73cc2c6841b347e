//! Configuration file discovery and loading.
//!
//! Configuration is optional: with no files present every setting takes
//! its default.

use crate::config::merger::merge_configs;
use crate::config::schema::SuperpipConfig;
use crate::error::{Result, SuperpipError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user and per-project config directory.
pub const CONFIG_DIR: &str = ".superpip";

/// Name of the config file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yml";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.superpip/config.yml`)
/// 2. Project config (`.superpip/config.yml`)
/// 3. Explicit `--config` file
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config
    pub user_global: Option<PathBuf>,

    /// Project config under the working directory
    pub project: Option<PathBuf>,

    /// Explicitly requested file (must exist)
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files relative to `working_dir`.
    pub fn discover(working_dir: &Path, explicit: Option<&Path>) -> Self {
        Self {
            user_global: dirs::home_dir().and_then(|home| existing(home.join(CONFIG_DIR))),
            project: existing(working_dir.join(CONFIG_DIR)),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    /// All paths to load, in merge order.
    pub fn in_merge_order(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.explicit]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(dir: PathBuf) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Parse YAML content into a config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SuperpipConfig> {
    let value = parse_value(content, source_path)?;
    from_value(value, source_path)
}

/// Load a config file as a raw YAML value (for merging).
///
/// An empty file loads as an empty mapping.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SuperpipError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SuperpipError::Io(e)
        }
    })?;

    parse_value(&content, path)
}

fn parse_value(content: &str, path: &Path) -> Result<serde_yaml::Value> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| SuperpipError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if value.is_null() {
        Ok(serde_yaml::Value::Mapping(Default::default()))
    } else {
        Ok(value)
    }
}

fn from_value(value: serde_yaml::Value, path: &Path) -> Result<SuperpipConfig> {
    serde_yaml::from_value(value).map_err(|e| SuperpipError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every discovered config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit path does not exist.
/// Returns `ConfigParseError` if any file is invalid.
pub fn load_config(working_dir: &Path, explicit: Option<&Path>) -> Result<SuperpipConfig> {
    let paths = ConfigPaths::discover(working_dir, explicit);
    load_from_paths(&paths)
}

/// Load and merge the given config paths.
pub fn load_from_paths(paths: &ConfigPaths) -> Result<SuperpipConfig> {
    let mut values = Vec::new();
    let mut last_path = None;

    for path in paths.in_merge_order() {
        tracing::debug!("Loading config from {}", path.display());
        values.push(load_config_value(path)?);
        last_path = Some(path.clone());
    }

    let Some(last_path) = last_path else {
        return Ok(SuperpipConfig::default());
    };

    from_value(merge_configs(&values), &last_path)
}
