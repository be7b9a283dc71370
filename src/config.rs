//! Configuration management for the match agent

use crate::error::{MatchAgentError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default request ceiling, also used when the environment value is
/// unset or not a positive integer.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

pub const BASE_URL_ENV: &str = "MATCH_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "MATCH_API_TIMEOUT_MS";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_LOCALE: &str = "zh";

/// Connection settings for the matching backend, read from the
/// environment at startup and never persisted.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            base_url,
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Preferred display locale, restored across sessions.
    pub locale: String,

    #[serde(skip, default = "ApiConfig::from_env")]
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            api: ApiConfig::from_env(),
        }
    }
}

impl Config {
    /// Loads the persisted preferences, creating the file with defaults
    /// on first run. API settings always come from the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                MatchAgentError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MatchAgentError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Directory holding the config file and the session state file.
    pub fn data_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("match-agent")
    }

    pub fn session_path() -> PathBuf {
        Self::data_dir().join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.locale, "zh");
        assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!config.api.base_url.is_empty());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.locale = "en".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.locale, "en");
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(path.clone()).unwrap();
        assert_eq!(config.locale, "zh");
        assert!(path.exists());
    }
}
