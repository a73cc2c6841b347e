//! Configuration schema definitions for superpip.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default remote package index.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple/";

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperpipConfig {
    /// Global settings
    pub settings: Settings,

    /// Extra curated module → package entries.
    ///
    /// These take priority over the built-in curated table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub curated: BTreeMap<String, String>,
}

/// Settings that shape discovery, catalog building and probing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote index listing every published package
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// HTTP timeout for the index fetch
    #[serde(default = "default_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Upper bound on a single import probe
    #[serde(default = "default_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Skip the index fetch and use curated data only
    #[serde(default, skip_serializing_if = "is_false")]
    pub offline: bool,

    /// Interpreter used for directory installs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_interpreter: Option<PathBuf>,

    /// Additional install roots scanned after the built-in ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub install_roots: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            fetch_timeout_secs: default_timeout_secs(),
            probe_timeout_secs: default_timeout_secs(),
            offline: false,
            host_interpreter: None,
            install_roots: Vec::new(),
        }
    }
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn is_false(v: &bool) -> bool {
    !v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: SuperpipConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SuperpipConfig::default());
        assert_eq!(config.settings.index_url, DEFAULT_INDEX_URL);
        assert_eq!(config.settings.fetch_timeout_secs, 30);
        assert_eq!(config.settings.probe_timeout_secs, 30);
        assert!(!config.settings.offline);
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
settings:
  index_url: http://mirror.local/simple/
  fetch_timeout_secs: 5
  probe_timeout_secs: 10
  offline: true
  host_interpreter: /opt/python/bin/python3
  install_roots:
    - /opt/pythons
curated:
  mymodule: my-package
"#;
        let config: SuperpipConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.settings.index_url, "http://mirror.local/simple/");
        assert_eq!(config.settings.fetch_timeout_secs, 5);
        assert_eq!(config.settings.probe_timeout_secs, 10);
        assert!(config.settings.offline);
        assert_eq!(
            config.settings.host_interpreter,
            Some(PathBuf::from("/opt/python/bin/python3"))
        );
        assert_eq!(config.settings.install_roots, vec![PathBuf::from("/opt/pythons")]);
        assert_eq!(config.curated.get("mymodule").unwrap(), "my-package");
    }

    #[test]
    fn partial_settings_keep_other_defaults() {
        let config: SuperpipConfig =
            serde_yaml::from_str("settings:\n  offline: true\n").unwrap();
        assert!(config.settings.offline);
        assert_eq!(config.settings.index_url, DEFAULT_INDEX_URL);
    }

    #[test]
    fn serialization_skips_defaults() {
        let yaml = serde_yaml::to_string(&SuperpipConfig::default()).unwrap();
        assert!(!yaml.contains("offline"));
        assert!(!yaml.contains("curated"));
        assert!(!yaml.contains("install_roots"));
    }
}
