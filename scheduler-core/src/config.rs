use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, SchedulerError};
use crate::login::DEFAULT_ACTIVITY_LOG;

/// Minutes ahead checked for the post-login appointment alert
pub const DEFAULT_UPCOMING_MINUTES: i64 = 15;

/// Longest alert window accepted from config: one week
pub const MAX_UPCOMING_MINUTES: i64 = 7 * 24 * 60;

/// User configuration for the scheduler, read from ~/.scheduler/config.toml
///
/// Every section is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub display: DisplayConfig,
    pub login: LoginConfig,
    pub alerts: AlertsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// IANA zone name, e.g. "America/Chicago"
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub activity_log: PathBuf,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            activity_log: PathBuf::from(DEFAULT_ACTIVITY_LOG),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub upcoming_minutes: i64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            upcoming_minutes: DEFAULT_UPCOMING_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    pub level: Option<String>,
}

impl SchedulerConfig {
    /// Load config from ~/.scheduler/config.toml, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SchedulerError::config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let minutes = self.alerts.upcoming_minutes;
        if !(0..=MAX_UPCOMING_MINUTES).contains(&minutes) {
            return Err(SchedulerError::config(format!(
                "alerts.upcoming_minutes must be between 0 and {}, got {}",
                MAX_UPCOMING_MINUTES, minutes
            )));
        }
        Ok(())
    }

    /// Get config file path: ~/.scheduler/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scheduler/config.toml")
    }

    /// Display zone: SCHEDULER_TIMEZONE, then `[display] timezone`, then TZ, then UTC
    pub fn display_zone(&self) -> Result<Tz> {
        self.display_zone_with(|key| env::var(key).ok())
    }

    pub fn display_zone_with<F>(&self, lookup: F) -> Result<Tz>
    where
        F: Fn(&str) -> Option<String>,
    {
        let candidates = [
            ("SCHEDULER_TIMEZONE", lookup("SCHEDULER_TIMEZONE")),
            ("display.timezone", self.display.timezone.clone()),
            ("TZ", lookup("TZ")),
        ];

        for (source, value) in candidates {
            let Some(name) = value.filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            // TZ may carry the POSIX ":" prefix
            let name = name.trim().trim_start_matches(':');
            return name.parse::<Tz>().map_err(|_| {
                SchedulerError::config(format!("{} is not a known time zone: {}", source, name))
            });
        }
        Ok(Tz::UTC)
    }

    /// Save config to file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| SchedulerError::config(format!("serialize failed: {}", e)))?;
        fs::write(&config_path, toml_str)?;

        Ok(config_path)
    }
}
