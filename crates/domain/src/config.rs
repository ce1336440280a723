//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_BACKOFF_MS, DEFAULT_FETCH_LIMIT, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_POLL_INTERVAL_SECS, MAX_ACTIVITY_ENTRIES,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Task manager API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/v1/...` paths are appended to (e.g. `http://localhost:8080/api`)
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Total attempts per request (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

/// Activity feed configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Maximum number of entries kept in a built feed
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Number of newest records requested per collection
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
}

/// Background refresh configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_poll_interval")]
    pub interval_seconds: u64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_seconds: default_timeout_seconds(),
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_base_backoff_ms(),
            access_token: None,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { max_entries: default_max_entries(), fetch_limit: default_fetch_limit() }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_seconds: default_poll_interval(), enabled: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            feed: FeedConfig::default(),
            polling: PollingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

const fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

const fn default_base_backoff_ms() -> u64 {
    DEFAULT_BASE_BACKOFF_MS
}

const fn default_max_entries() -> usize {
    MAX_ACTIVITY_ENTRIES
}

const fn default_fetch_limit() -> u32 {
    DEFAULT_FETCH_LIMIT
}

const fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
