use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "sitekit.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Sitekit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `<project id>.json` per project
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Total attempts for a save or load that hits a transport error
    #[serde(default = "default_save_retries")]
    pub save_retries: u32,
}

fn default_store_dir() -> String {
    ".sitekit".to_string()
}

fn default_save_retries() -> u32 {
    3
}

impl Config {
    /// Load config from a directory, falling back to defaults when there is none
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let path = cwd.join(DEFAULT_CONFIG_NAME);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Absolute path to the project store
    pub fn store_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            save_retries: default_save_retries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storeDir": "projects",
            "saveRetries": 5
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_dir, "projects");
        assert_eq!(config.save_retries, 5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "saveRetries": 1 }"#).unwrap();
        assert_eq!(config.store_dir, ".sitekit");
        assert_eq!(config.save_retries, 1);
    }

    #[test]
    fn test_missing_file_gives_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.store_dir(dir.path()), dir.path().join(".sitekit"));
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();

        assert!(matches!(
            Config::load(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
