//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable text.
    Text,
}

impl LogFormat {
    /// Parse from a string (`"json"` or `"text"`, case-insensitive).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" | "pretty" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// App consumer secret, keys CRC responses and signature checks
    pub consumer_secret: String,

    /// URL path registered with the platform as the webhook
    pub webhook_path: String,

    /// Deadline for fanning out one payload in milliseconds (default: 5000)
    pub dispatch_timeout_ms: u64,

    /// Maximum accepted request body in bytes (default: 1MB)
    pub max_body_size: usize,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let webhook_path = var("WEBHOOK_PATH").unwrap_or_else(|| "/webhooks/twitter".into());
        anyhow::ensure!(
            webhook_path.starts_with('/'),
            "WEBHOOK_PATH must start with '/', got {webhook_path:?}"
        );

        Ok(Self {
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".into()),
            consumer_secret: var("CONSUMER_SECRET").context("CONSUMER_SECRET must be set")?,
            webhook_path,
            dispatch_timeout_ms: var("DISPATCH_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            max_body_size: var("MAX_BODY_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            log_format: var("LOG_FORMAT")
                .and_then(|v| LogFormat::parse_str(&v))
                .unwrap_or_default(),
        })
    }

    pub const fn dispatch_timeout(&self) -> Duration {
        Duration::from_millis(self.dispatch_timeout_ms)
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            consumer_secret: "test-consumer-secret".into(),
            webhook_path: "/webhooks/twitter".into(),
            dispatch_timeout_ms: 5000,
            max_body_size: 1024 * 1024,
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse_str("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse_str(" text "), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse_str("pretty"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse_str("xml"), None);
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn log_format_comes_from_log_format_var() {
        let config =
            Config::from_vars(lookup(&[("CONSUMER_SECRET", "s3cr3t"), ("LOG_FORMAT", "text")]))
                .unwrap();
        assert_eq!(config.log_format, LogFormat::Text);

        let config = Config::from_vars(lookup(&[("CONSUMER_SECRET", "s3cr3t")])).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.webhook_path, "/webhooks/twitter");
        assert_eq!(config.max_body_size, 1024 * 1024);
    }

    #[test]
    fn consumer_secret_is_required() {
        let err = Config::from_vars(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("CONSUMER_SECRET"));
    }

    #[test]
    fn webhook_path_must_be_absolute() {
        let err = Config::from_vars(lookup(&[
            ("CONSUMER_SECRET", "s3cr3t"),
            ("WEBHOOK_PATH", "webhooks/twitter"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_PATH"));
    }

    #[test]
    fn dispatch_timeout_defaults_to_five_seconds() {
        let config = Config::default_for_test();
        assert_eq!(config.dispatch_timeout(), Duration::from_secs(5));
    }
}
