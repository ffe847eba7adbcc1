//! Client settings and their persistence
//!
//! [`ClientSettings`] configures the API client: where the server lives and
//! how patient to be with it. Settings are read from a JSON file in the
//! user's configuration directory, then overridden from the environment.
//!
//! # File Location
//!
//! `settings.json` under the platform config dir, e.g.
//! `~/.config/chess-trainer/settings.json` on Linux. Falls back to a local
//! `settings.json` if no config dir can be determined.
//!
//! # Environment
//!
//! - `CHESS_API_BASE` - Server base URL
//! - `CHESS_REQUEST_TIMEOUT` - Per-attempt timeout, humantime format (`10s`, `1500ms`)
//!
//! # Error Handling
//!
//! [`ClientSettings::load_or_default`] never fails: a missing or unreadable
//! file logs a warning and yields defaults. The explicit `load_from`/`save_to`
//! return [`CoreResult`] for callers that care.

use crate::core::error::{CoreError, CoreResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

pub const ENV_API_BASE: &str = "CHESS_API_BASE";
pub const ENV_REQUEST_TIMEOUT: &str = "CHESS_REQUEST_TIMEOUT";

/// Connection settings for the backend API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL every request path is joined onto
    pub api_base: String,

    /// Timeout of a single request attempt, in milliseconds
    pub request_timeout_ms: u64,

    /// Attempts per request, including the first one
    pub max_attempts: u32,

    /// Base retry delay; attempt `n` waits `n * retry_delay_ms`
    pub retry_delay_ms: u64,

    /// Timeout of a health probe, in milliseconds
    pub health_timeout_ms: u64,

    /// Interval between connectivity probes, in milliseconds
    pub health_interval_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8080".to_string(),
            request_timeout_ms: 10_000,
            max_attempts: 3,
            retry_delay_ms: 1_000,
            health_timeout_ms: 5_000,
            health_interval_ms: 30_000,
        }
    }
}

impl ClientSettings {
    /// Path of the settings file in the user's configuration directory
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("com", "chess-trainer", "ChessTrainer") {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
            None => PathBuf::from(SETTINGS_FILENAME),
        }
    }

    /// Load settings from `path`
    ///
    /// Fields missing from the file take their default values.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings to `path` as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("[SETTINGS] Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings from the default file plus environment overrides
    ///
    /// Falls back to defaults (with a warning) at every step that fails.
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        let mut settings = if path.exists() {
            match Self::load_from(&path) {
                Ok(settings) => {
                    info!("[SETTINGS] Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!(
                        "[SETTINGS] Failed to load settings at {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            }
        } else {
            info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
            Self::default()
        };

        if let Err(e) = settings.apply_overrides(|key| std::env::var(key).ok()) {
            warn!("[SETTINGS] Ignoring environment override: {}", e);
        }
        settings
    }

    /// Apply `CHESS_*` overrides read through `lookup`
    ///
    /// Each override is validated before it is applied; on error the
    /// settings are left as they were.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut next = self.clone();

        if let Some(base) = lookup(ENV_API_BASE) {
            next.api_base = base.trim().to_string();
        }
        if let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT) {
            let parsed = humantime::parse_duration(timeout.trim()).map_err(|e| {
                CoreError::InvalidSetting {
                    key: ENV_REQUEST_TIMEOUT.to_string(),
                    message: e.to_string(),
                }
            })?;
            next.request_timeout_ms = parsed.as_millis() as u64;
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Reject values the client cannot work with
    pub fn validate(&self) -> CoreResult<()> {
        url::Url::parse(&self.api_base).map_err(|e| CoreError::InvalidSetting {
            key: "api_base".to_string(),
            message: e.to_string(),
        })?;
        if self.max_attempts == 0 {
            return Err(CoreError::InvalidSetting {
                key: "max_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.request_timeout_ms == 0 || self.health_timeout_ms == 0 {
            return Err(CoreError::InvalidSetting {
                key: "timeout".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Delay before attempt `attempt + 1`, growing linearly
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(u64::from(attempt)))
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_millis(self.health_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();

        assert_eq!(settings.api_base, "http://localhost:8080");
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.health_timeout(), Duration::from_secs(5));
        assert_eq!(settings.health_interval(), Duration::from_secs(30));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_retry_delay_grows_linearly() {
        let settings = ClientSettings::default();

        assert_eq!(settings.retry_delay(1), Duration::from_secs(1));
        assert_eq!(settings.retry_delay(2), Duration::from_secs(2));
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut settings = ClientSettings::default();

        settings
            .apply_overrides(env(&[
                (ENV_API_BASE, "https://chess.example.com"),
                (ENV_REQUEST_TIMEOUT, "1500ms"),
            ]))
            .unwrap();

        assert_eq!(settings.api_base, "https://chess.example.com");
        assert_eq!(settings.request_timeout_ms, 1500);
    }

    #[test]
    fn test_invalid_override_leaves_settings_untouched() {
        let mut settings = ClientSettings::default();

        let err = settings
            .apply_overrides(env(&[
                (ENV_API_BASE, "https://chess.example.com"),
                (ENV_REQUEST_TIMEOUT, "soon"),
            ]))
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidSetting { .. }));
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn test_zero_attempts_is_invalid() {
        let settings = ClientSettings {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
