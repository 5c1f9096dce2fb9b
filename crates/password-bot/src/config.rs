//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use session_store::{SessionConfig, VerificationPolicy};
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// Credential database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Session expiry configuration
    #[serde(default)]
    pub session: SessionSettings,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: SecretString,

    /// Bot API endpoint
    #[serde(default = "default_telegram_url")]
    pub api_url: String,

    /// Long-poll timeout for getUpdates
    #[serde(default = "default_poll_timeout", with = "humantime_serde")]
    pub poll_timeout: Duration,
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
pub struct VerificationConfig {
    /// How long an issued code stays valid
    #[serde(default = "default_code_ttl", with = "humantime_serde")]
    pub code_ttl: Duration,

    /// Wrong codes allowed before a new one must be requested (unset = unlimited)
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Idle time before an unverified session is dropped
    #[serde(default = "default_pending_ttl", with = "humantime_serde")]
    pub pending_ttl: Duration,

    /// Idle time before a verified session is dropped
    #[serde(default = "default_idle_ttl", with = "humantime_serde")]
    pub idle_ttl: Duration,

    /// Interval between expiry sweeps
    #[serde(default = "default_cleanup_interval", with = "humantime_serde")]
    pub cleanup_interval: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// Default implementations
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout: default_acquire_timeout(),
        }
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl: default_code_ttl(),
            max_attempts: None,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            pending_ttl: default_pending_ttl(),
            idle_ttl: default_idle_ttl(),
            cleanup_interval: default_cleanup_interval(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl From<&VerificationConfig> for VerificationPolicy {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_ttl: config.code_ttl,
            max_attempts: config.max_attempts,
        }
    }
}

impl From<&SessionSettings> for SessionConfig {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            pending_ttl: settings.pending_ttl,
            idle_ttl: settings.idle_ttl,
            cleanup_interval: settings.cleanup_interval,
        }
    }
}

// Default value functions
fn default_telegram_url() -> String {
    "https://api.telegram.org".into()
}

fn default_poll_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_code_ttl() -> Duration {
    Duration::from_secs(10 * 60)
}

fn default_pending_ttl() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_idle_ttl() -> Duration {
    Duration::from_secs(30 * 24 * 60 * 60) // 30 days
}

fn default_cleanup_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::default())
    }

    fn from_source(env: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                env.separator("__")
                    // Keep strings as strings: parsing would turn a token or
                    // phone-like value into a number.
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
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default().source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_source(env(&[("TELEGRAM__BOT_TOKEN", "123:abc")])).unwrap();

        assert_eq!(config.telegram.bot_token.expose_secret(), "123:abc");
        assert_eq!(config.telegram.api_url, "https://api.telegram.org");
        assert_eq!(config.telegram.poll_timeout, Duration::from_secs(60));
        assert!(config.database.url.is_none());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.verification.code_ttl, Duration::from_secs(600));
        assert_eq!(config.verification.max_attempts, None);
        assert_eq!(config.session.pending_ttl, Duration::from_secs(1800));
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_source(env(&[
            ("TELEGRAM__BOT_TOKEN", "123:abc"),
            ("TELEGRAM__POLL_TIMEOUT", "30s"),
            ("DATABASE__URL", "postgres://localhost/passwords"),
            ("DATABASE__MAX_CONNECTIONS", "12"),
            ("VERIFICATION__CODE_TTL", "5m"),
            ("VERIFICATION__MAX_ATTEMPTS", "3"),
            ("SESSION__IDLE_TTL", "1h"),
            ("LOG__FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.telegram.poll_timeout, Duration::from_secs(30));
        assert_eq!(
            config.database.url.as_ref().map(|u| u.expose_secret().as_str()),
            Some("postgres://localhost/passwords")
        );
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.verification.code_ttl, Duration::from_secs(300));
        assert_eq!(config.verification.max_attempts, Some(3));
        assert_eq!(config.session.idle_ttl, Duration::from_secs(3600));
        assert_eq!(config.log.format, LogFormat::Json);

        let policy = VerificationPolicy::from(&config.verification);
        assert_eq!(policy.max_attempts, Some(3));
    }

    #[test]
    fn test_missing_token() {
        assert!(Config::from_source(env(&[])).is_err());
    }
}
