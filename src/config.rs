//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CatalogError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON file backing the item collection
    pub data_path: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Freshness window of the statistics snapshot, in seconds
    pub stats_cache_ttl: u64,
    /// How long a store probe result is reused, in seconds
    pub probe_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATA_PATH` - Backing JSON file (default: data/items.json)
    /// - `SERVER_PORT` - HTTP server port (default: 4001)
    /// - `STATS_CACHE_TTL` - Stats freshness window in seconds (default: 300)
    /// - `PROBE_TTL` - Store probe window in seconds (default: 60)
    ///
    /// A variable that is set but cannot be parsed is a `ConfigurationError`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            server_port: parse_var("SERVER_PORT")?.unwrap_or(defaults.server_port),
            stats_cache_ttl: parse_var("STATS_CACHE_TTL")?.unwrap_or(defaults.stats_cache_ttl),
            probe_ttl: parse_var("PROBE_TTL")?.unwrap_or(defaults.probe_ttl),
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects values the caches cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(CatalogError::ConfigurationError(
                "DATA_PATH must not be empty".to_string(),
            ));
        }
        if self.stats_cache_ttl == 0 {
            return Err(CatalogError::ConfigurationError(
                "STATS_CACHE_TTL must be greater than zero".to_string(),
            ));
        }
        if self.probe_ttl == 0 {
            return Err(CatalogError::ConfigurationError(
                "PROBE_TTL must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_cache_ttl)
    }

    pub fn probe_window(&self) -> Duration {
        Duration::from_secs(self.probe_ttl)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            CatalogError::ConfigurationError(format!("{} has invalid value '{}'", name, raw))
        }),
        Err(_) => Ok(None),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/items.json"),
            server_port: 4001,
            stats_cache_ttl: 300,
            probe_ttl: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_path, PathBuf::from("data/items.json"));
        assert_eq!(config.server_port, 4001);
        assert_eq!(config.stats_cache_ttl, 300);
        assert_eq!(config.probe_ttl, 60);
        assert_eq!(config.stats_ttl(), Duration::from_secs(300));
        assert_eq!(config.probe_window(), Duration::from_secs(60));
    }

    // Single test touching the process environment so parallel tests never race on it.
    #[test]
    fn test_config_from_env() {
        env::remove_var("DATA_PATH");
        env::remove_var("SERVER_PORT");
        env::remove_var("STATS_CACHE_TTL");
        env::remove_var("PROBE_TTL");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_port, 4001);
        assert_eq!(config.stats_cache_ttl, 300);

        env::set_var("SERVER_PORT", "not-a-port");
        let result = Config::from_env();
        assert!(matches!(result, Err(CatalogError::ConfigurationError(_))));
        env::remove_var("SERVER_PORT");

        env::set_var("STATS_CACHE_TTL", "0");
        let result = Config::from_env();
        assert!(matches!(result, Err(CatalogError::ConfigurationError(_))));
        env::remove_var("STATS_CACHE_TTL");
    }

    #[test]
    fn test_validate_empty_data_path() {
        let config = Config {
            data_path: PathBuf::new(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CatalogError::ConfigurationError(_))
        ));
    }
}
