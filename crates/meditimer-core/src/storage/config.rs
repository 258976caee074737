//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default session length
//! - Alert preferences (sound, vibration)
//!
//! Configuration is stored at `~/.config/meditimer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::data_dir;

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Session length preselected when the app opens, in minutes.
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
}

/// Completion alert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_true")]
    pub vibration: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/meditimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

fn default_minutes() -> u32 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            sound: true,
            vibration: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            alerts: AlertsConfig::default(),
        }
    }
}

impl AppConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write back the default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Save to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.timer.default_minutes, 10);
        assert!(cfg.alerts.sound);
        assert!(cfg.alerts.vibration);
    }

    #[test]
    fn missing_file_writes_back_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.timer.default_minutes, 10);
        assert!(path.exists());
    }

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = AppConfig {
            timer: TimerConfig { default_minutes: 20 },
            alerts: AlertsConfig {
                sound: false,
                vibration: true,
            },
        };
        cfg.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.timer.default_minutes, 20);
        assert!(!loaded.alerts.sound);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\ndefault_minutes = 15\n").unwrap();
        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.timer.default_minutes, 15);
        assert!(cfg.alerts.sound);
    }

    #[test]
    fn garbage_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "{{{not toml").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
