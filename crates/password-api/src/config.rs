//! Configuration for the password API.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Credential database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on handling a single request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; the in-memory store is used when unset
    #[serde(default)]
    pub url: Option<SecretString>,

    /// Pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long to wait for a pooled connection
    #[serde(default = "default_acquire_timeout", with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout: default_acquire_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LogConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout, Duration::from_secs(10));
        assert!(config.database.url.is_none());
        assert!(!config.log.is_json());
    }

    #[test]
    fn test_durations_and_format() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "server": { "port": 9000, "request_timeout": "2s" },
            "database": { "url": "postgres://localhost/passwords", "acquire_timeout": "500ms" },
            "log": { "format": "JSON" }
        }))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout, Duration::from_secs(2));
        assert_eq!(config.database.acquire_timeout, Duration::from_millis(500));
        assert!(config.database.url.is_some());
        assert!(config.log.is_json());
    }
}
