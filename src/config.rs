use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::forwarder::ForwardingPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// The log level to use, this is a tracing env filter
    pub level: String,

    /// Emit logs as JSON instead of the pretty format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// The spreadsheet webhook endpoint, empty disables forwarding
    pub url: String,

    /// Per-request timeout for the webhook call, in seconds
    pub timeout_secs: u64,

    /// What to do when the webhook fails
    pub policy: ForwardingPolicy,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 10,
            policy: ForwardingPolicy::Strict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// The address to bind to
    pub bind_address: SocketAddr,

    /// Directory holding the submission log and the failure log
    pub data_dir: PathBuf,

    /// Directory the static assets are served from
    pub static_dir: PathBuf,

    /// Spreadsheet webhook configuration
    pub webhook: WebhookConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            bind_address: "0.0.0.0:8000".parse().expect("invalid default bind address"),
            data_dir: PathBuf::from("data"),
            static_dir: PathBuf::from("img"),
            webhook: WebhookConfig::default(),
        }
    }
}

impl AppConfig {
    /// Builds the config from the defaults and the `CONTACT_` environment
    /// variables. Read once at startup, the result is owned by the global
    /// state and passed by reference from there.
    pub fn parse() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("CONTACT_LOG_LEVEL") {
            config.logging.level = value;
        }

        if let Ok(value) = std::env::var("CONTACT_LOG_JSON") {
            config.logging.json = value.parse().context("failed to parse CONTACT_LOG_JSON")?;
        }

        if let Ok(value) = std::env::var("CONTACT_BIND_ADDRESS") {
            config.bind_address = value
                .parse()
                .context("failed to parse CONTACT_BIND_ADDRESS")?;
        }

        if let Ok(value) = std::env::var("CONTACT_DATA_DIR") {
            config.data_dir = PathBuf::from(value);
        }

        if let Ok(value) = std::env::var("CONTACT_STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }

        if let Ok(value) = std::env::var("CONTACT_WEBHOOK_URL") {
            config.webhook.url = value.trim().to_string();
        }

        if let Ok(value) = std::env::var("CONTACT_WEBHOOK_TIMEOUT") {
            config.webhook.timeout_secs = value
                .parse()
                .context("failed to parse CONTACT_WEBHOOK_TIMEOUT")?;
        }

        if let Ok(value) = std::env::var("CONTACT_FORWARDING") {
            config.webhook.policy = value.parse().context("failed to parse CONTACT_FORWARDING")?;
        }

        Ok(config)
    }
}
