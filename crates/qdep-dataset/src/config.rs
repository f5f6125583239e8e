//! Dataset configuration.
//!
//! Supports loading configuration from:
//! 1. .env files (loaded into the process environment first)
//! 2. Configuration files (YAML)
//! 3. Environment variables (with QDEP_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! ```yaml
//! max_window: 2
//! replicas: 10
//! pretty: false
//! feature_map:
//!   cx: 1.0
//!   cz: 2.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::features::FeatureMap;

/// Augmentation and output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Largest contiguous edge window removed at once.
    #[serde(default = "default_max_window")]
    pub max_window: usize,

    /// Identical copies stored per variant.
    #[serde(default = "default_replicas")]
    pub replicas: usize,

    /// Pretty-print sample files.
    #[serde(default)]
    pub pretty: bool,

    /// Gate-type feature table.
    #[serde(default)]
    pub feature_map: FeatureMap,
}

fn default_max_window() -> usize {
    2
}

fn default_replicas() -> usize {
    10
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            max_window: default_max_window(),
            replicas: default_replicas(),
            pretty: false,
            feature_map: FeatureMap::reference(),
        }
    }
}

impl DatasetConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: DatasetConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration in this order:
    /// 1. Load .env file into the environment if it exists
    /// 2. Load from file if provided, else start from defaults
    /// 3. Apply environment variable overrides, including any set by .env
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => DatasetConfig::default(),
        };

        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QDEP_*` overrides from `lookup`.
    ///
    /// Only variables that are set override the current values; a set
    /// variable that does not parse is an error.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QDEP_MAX_WINDOW") {
            self.max_window = parse_env("QDEP_MAX_WINDOW", &v)?;
        }
        if let Some(v) = lookup("QDEP_REPLICAS") {
            self.replicas = parse_env("QDEP_REPLICAS", &v)?;
        }
        if let Some(v) = lookup("QDEP_PRETTY") {
            self.pretty = parse_env("QDEP_PRETTY", &v)?;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.replicas == 0 {
            return Err(ConfigError::Validation(
                "replicas must be greater than 0".to_string(),
            ));
        }

        if self.feature_map.is_empty() {
            return Err(ConfigError::Validation(
                "feature_map must contain at least one gate type".to_string(),
            ));
        }

        if let Some((tag, value)) = self.feature_map.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Validation(format!(
                "feature value for '{tag}' is not finite: {value}"
            )));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{key}: cannot parse '{value}'")))
}
