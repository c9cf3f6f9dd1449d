//! Tasklist configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::StoreConfig;

/// Main tasklist configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Task service connection
    pub service: ServiceConfig,

    /// Sync store tuning
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tasklist.yml
        let local_config = PathBuf::from(".tasklist.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tasklist/tasklist.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tasklist").join("tasklist.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Task service connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the task service
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.service.base_url, "http://localhost:3000");
        assert_eq!(config.service.timeout_ms, 10_000);
        assert_eq!(config.store.command_buffer, 64);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
service:
  base-url: http://tasks.internal:8080
  timeout-ms: 3000

store:
  command-buffer: 16
  event-buffer: 8
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.service.base_url, "http://tasks.internal:8080");
        assert_eq!(config.service.timeout_ms, 3000);
        assert_eq!(config.store.command_buffer, 16);
        assert_eq!(config.store.event_buffer, 8);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
service:
  base-url: http://10.0.0.5:3000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.service.base_url, "http://10.0.0.5:3000");

        // Defaults for unspecified
        assert_eq!(config.service.timeout_ms, 10_000);
        assert_eq!(config.store.command_buffer, 64);
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "service:\n  timeout-ms: 1234").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.service.timeout_ms, 1234);
    }

    #[test]
    fn test_load_explicit_path_missing_fails() {
        let result = Config::load(Some(&PathBuf::from("/nonexistent/tasklist.yml")));
        assert!(result.is_err());
    }
}
