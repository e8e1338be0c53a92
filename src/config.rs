//! Configuration loading
//!
//! Settings come from, highest precedence first:
//! 1. Environment variables (`STUDYDECK_DATA_DIR`, `STUDYDECK_LOG`)
//! 2. A TOML file, either passed explicitly or found at
//!    `<config dir>/studydeck/config.toml`
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ai::MockLatency;
use crate::pomodoro::PomodoroSettings;

const APP_DIR_NAME: &str = "studydeck";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Longest allowed pomodoro session or break
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;

pub const ENV_DATA_DIR: &str = "STUDYDECK_DATA_DIR";
pub const ENV_LOG: &str = "STUDYDECK_LOG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine a data directory")]
    DataDirNotFound,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where study data is kept; the platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Default log filter when neither `RUST_LOG` nor `-v` is given
    pub log_level: String,
    pub ai: AiConfig,
    pub pomodoro: PomodoroSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Sleep like a remote model would before answering
    pub simulate_latency: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "warn".to_string(),
            ai: AiConfig::default(),
            pomodoro: PomodoroSettings::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            simulate_latency: true,
        }
    }
}

impl AiConfig {
    pub fn latency(&self) -> MockLatency {
        if self.simulate_latency {
            MockLatency::default()
        } else {
            MockLatency::none()
        }
    }
}

impl Config {
    /// Load from `explicit`, else from the default location when that file
    /// exists, else defaults. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.is_file()),
        };

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override fields from environment variables looked up through `var`
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = var(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.pomodoro;
        if p.long_break_interval == 0 {
            return Err(ConfigError::Invalid(
                "pomodoro.long_break_interval must be greater than zero".to_string(),
            ));
        }

        let durations = [
            ("work_minutes", p.work_minutes),
            ("short_break_minutes", p.short_break_minutes),
            ("long_break_minutes", p.long_break_minutes),
        ];
        for (name, value) in durations {
            if value == 0 || value > MAX_SESSION_MINUTES {
                return Err(ConfigError::Invalid(format!(
                    "pomodoro.{} must be between 1 and {}",
                    name, MAX_SESSION_MINUTES
                )));
            }
        }
        Ok(())
    }

    /// Configured data directory, or the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join(APP_DIR_NAME))
                .ok_or(ConfigError::DataDirNotFound),
        }
    }
}

/// `<config dir>/studydeck/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert!(config.ai.simulate_latency);
        assert_eq!(config.pomodoro.work_minutes, 25);
        assert_eq!(config.pomodoro.long_break_interval, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            log_level = "debug"

            [pomodoro]
            work_minutes = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.pomodoro.work_minutes, 50);
        assert_eq!(config.pomodoro.short_break_minutes, 5);
        assert!(config.ai.simulate_latency);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/tmp/decks\"\n[ai]\nsimulate_latency = false\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/decks")));
        assert_eq!(config.ai.latency(), MockLatency::none());
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(matches!(Config::from_file(&missing), Err(ConfigError::Io { .. })));

        let bad = temp_dir.path().join("bad.toml");
        fs::write(&bad, "log_level = [").unwrap();
        assert!(matches!(Config::from_file(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            [(ENV_DATA_DIR, "/srv/study"), (ENV_LOG, "info")].into_iter().collect();

        let mut config = Config::default();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/study")));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.resolve_data_dir().unwrap(), PathBuf::from("/srv/study"));
    }

    #[test]
    fn test_zero_pomodoro_values_rejected() {
        let config = Config::from_toml("[pomodoro]\nlong_break_interval = 0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_oversized_pomodoro_durations_rejected() {
        let config = Config::from_toml("[pomodoro]\nwork_minutes = 80000000\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = Config::from_toml("[pomodoro]\nlong_break_minutes = 1440\n").unwrap();
        assert!(config.validate().is_ok());
    }
}
