//! Tracing setup for the scheduler CLI
//!
//! Usage:
//!   scheduler --debug ...                 # Debug logging to console
//!   RUST_LOG=scheduler_core=debug ...     # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                              # Log filter (default: `[logging] level`, else warn)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level if RUST_LOG is not set)
    pub debug: bool,
    /// Filter directive from the config file, used when RUST_LOG is unset
    pub level: Option<String>,
}

impl TracingConfig {
    fn fallback_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.level.as_deref().unwrap_or("warn")
        }
    }
}

/// Initialize tracing with console output on stderr
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.fallback_directive()))
        .map_err(|err| anyhow!("invalid log filter: {}", err))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_wins_over_config_level() {
        let config = TracingConfig {
            debug: true,
            level: Some("info".into()),
        };
        assert_eq!(config.fallback_directive(), "debug");
    }

    #[test]
    fn quiet_by_default() {
        assert_eq!(TracingConfig::default().fallback_directive(), "warn");
    }
}
