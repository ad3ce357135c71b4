//! Monitor configuration loaded from `review-watch.toml` and the environment.
//!
//! [`MonitorConfig`] holds every tunable. Values missing from the file fall
//! back to sensible defaults. The three credentials (`PRACTICUM_TOKEN`,
//! `TELEGRAM_TOKEN`, `TELEGRAM_CHAT_ID`) are normally supplied through the
//! environment or a `.env` file, and the environment wins over the file.
//!
//! [`MonitorConfig::validate`] turns the loose config into [`Settings`], and is
//! the single place where a missing credential becomes a fatal error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::{practicum, telegram};

pub const DEFAULT_CONFIG_FILE: &str = "review-watch.toml";

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Top-level configuration as read from disk and environment.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// OAuth token for the homework status API.
    #[serde(default)]
    pub practicum_token: String,

    /// Bot token used to send notifications.
    #[serde(default)]
    pub telegram_token: String,

    /// Chat that receives every notification.
    #[serde(default)]
    pub telegram_chat_id: Option<i64>,

    /// Homework status endpoint queried with `from_date`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bot API base URL, without the `/bot<token>` suffix.
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,

    /// Pause between two poll cycles, in seconds.
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,

    /// Upper bound on a whole HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on establishing a connection, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whether an empty homework list is reported to the chat.
    #[serde(default = "default_report_empty")]
    pub report_empty: bool,

    /// Directory for daily-rotated log files. Logs go to stderr only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_endpoint() -> String {
    practicum::client::API_URL.to_string()
}

fn default_telegram_api_url() -> String {
    telegram::client::API_URL.to_string()
}

// Ten minutes, the cadence the review API is meant to be polled at.
fn default_retry_interval_secs() -> u64 {
    600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_report_empty() -> bool {
    true
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            practicum_token: String::new(),
            telegram_token: String::new(),
            telegram_chat_id: None,
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_interval_secs: default_retry_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            report_empty: default_report_empty(),
            log_dir: None,
        }
    }
}

/// Connect and whole-request timeouts shared by both HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(default_connect_timeout_secs()),
            request: Duration::from_secs(default_request_timeout_secs()),
        }
    }
}

/// Validated configuration; every credential is guaranteed to be present.
#[derive(Debug, Clone)]
pub struct Settings {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: i64,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_interval: Duration,
    pub timeouts: Timeouts,
    pub report_empty: bool,
}

impl MonitorConfig {
    /// Loads `.env`, then the config file at `path` (or `review-watch.toml`
    /// in the current directory), then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an injectable environment lookup.
    pub fn load_with(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<MonitorConfig>(&contents)?
        } else {
            Self::default()
        };

        if let Some(token) = env(PRACTICUM_TOKEN).filter(|v| !v.is_empty()) {
            config.practicum_token = token;
        }
        if let Some(token) = env(TELEGRAM_TOKEN).filter(|v| !v.is_empty()) {
            config.telegram_token = token;
        }
        if let Some(raw) = env(TELEGRAM_CHAT_ID).filter(|v| !v.is_empty()) {
            let chat_id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidChatId(raw.clone()))?;
            config.telegram_chat_id = Some(chat_id);
        }

        Ok(config)
    }

    /// Checks that every credential is present, naming all missing ones.
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let mut missing = Vec::new();
        if self.practicum_token.trim().is_empty() {
            missing.push(PRACTICUM_TOKEN);
        }
        if self.telegram_token.trim().is_empty() {
            missing.push(TELEGRAM_TOKEN);
        }
        let Some(chat_id) = self.telegram_chat_id else {
            missing.push(TELEGRAM_CHAT_ID);
            return Err(ConfigError::Missing(missing));
        };
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(Settings {
            practicum_token: self.practicum_token,
            telegram_token: self.telegram_token,
            chat_id,
            endpoint: self.endpoint,
            telegram_api_url: self.telegram_api_url,
            retry_interval: Duration::from_secs(self.retry_interval_secs),
            timeouts: Timeouts {
                connect: Duration::from_secs(self.connect_timeout_secs),
                request: Duration::from_secs(self.request_timeout_secs),
            },
            report_empty: self.report_empty,
        })
    }
}
