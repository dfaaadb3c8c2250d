//! Configuration loading for the `linda` binary

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Contents of `linda.yml`
///
/// Every section is optional; command-line flags take precedence over
/// whatever is set here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sieve: SieveConfig,

    #[serde(default)]
    pub script: ScriptConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SieveConfig {
    /// Largest candidate written into the space
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Threads that strike out multiples of each prime
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            workers: default_workers(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScriptConfig {
    /// Log every executed script line at INFO
    #[serde(default)]
    pub echo: bool,
}

fn default_limit() -> i64 {
    100
}

fn default_workers() -> usize {
    3
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text; an empty document gives defaults
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            Self::from_file(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::from_yaml("sieve:\n  limit: 50\n").unwrap();
        assert_eq!(config.sieve.limit, 50);
        assert_eq!(config.sieve.workers, 3);
        assert!(!config.script.echo);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let err = Config::from_yaml("sieve: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_or_default("/nonexistent/linda.yml").unwrap();
        assert_eq!(config, Config::default());
    }
}
