//! Configuration loader
//!
//! ## Loading Strategy
//! 1. If `TASKDASH_API_BASE_URL` is set, the whole configuration comes from
//!    environment variables
//! 2. Otherwise the first config file found by [`probe_config_paths`] is
//!    loaded (JSON or TOML, by extension)
//! 3. With neither, built-in defaults are used
//!
//! `TASKDASH_API_TOKEN` always overrides the token from a file, so secrets
//! can stay out of checked-in config.
//!
//! ## Environment Variables
//! - `TASKDASH_API_BASE_URL`: API base URL (required for env loading)
//! - `TASKDASH_API_TOKEN`: Bearer token
//! - `TASKDASH_API_TIMEOUT`: Per-request timeout in seconds
//! - `TASKDASH_API_MAX_ATTEMPTS`: Attempts per request
//! - `TASKDASH_API_BACKOFF_MS`: Base retry backoff in milliseconds
//! - `TASKDASH_FEED_MAX_ENTRIES`: Feed length cap
//! - `TASKDASH_FEED_FETCH_LIMIT`: Records requested per collection
//! - `TASKDASH_POLL_INTERVAL`: Refresh interval in seconds
//! - `TASKDASH_POLL_ENABLED`: Whether background refresh runs (true/false)
//! - `TASKDASH_LOG_LEVEL`: Default log filter
//! - `TASKDASH_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! `config.{json,toml}` and `taskdash.{json,toml}` in the working directory
//! and its two parents, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use taskdash_domain::{
    ApiConfig, Config, FeedConfig, LoggingConfig, PollingConfig, Result, TaskDashError,
};
use tracing::{debug, info};

const BASE_URL_VAR: &str = "TASKDASH_API_BASE_URL";
const TOKEN_VAR: &str = "TASKDASH_API_TOKEN";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "taskdash.json", "taskdash.toml"];

/// Load configuration using the strategy described in the module docs.
///
/// # Errors
/// Returns `TaskDashError::Config` if the selected source is invalid.
pub fn load() -> Result<Config> {
    let mut config = if std::env::var_os(BASE_URL_VAR).is_some() {
        let config = load_from_env()?;
        info!("Configuration loaded from environment variables");
        config
    } else if let Some(path) = probe_config_paths() {
        load_from_file(Some(path))?
    } else {
        debug!("No configuration source found; using defaults");
        Config::default()
    };

    if let Some(token) = optional_var(TOKEN_VAR) {
        config.api.access_token = Some(token);
    }

    validate(&config)?;
    Ok(config)
}

/// Load configuration from environment variables.
///
/// Only `TASKDASH_API_BASE_URL` is required; everything else falls back to
/// the defaults.
///
/// # Errors
/// Returns `TaskDashError::Config` if the base URL is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let api = ApiConfig {
        base_url: env_var(BASE_URL_VAR)?,
        timeout_seconds: env_parse("TASKDASH_API_TIMEOUT", defaults.api.timeout_seconds)?,
        max_attempts: env_parse("TASKDASH_API_MAX_ATTEMPTS", defaults.api.max_attempts)?,
        base_backoff_ms: env_parse("TASKDASH_API_BACKOFF_MS", defaults.api.base_backoff_ms)?,
        access_token: optional_var(TOKEN_VAR),
    };

    let feed = FeedConfig {
        max_entries: env_parse("TASKDASH_FEED_MAX_ENTRIES", defaults.feed.max_entries)?,
        fetch_limit: env_parse("TASKDASH_FEED_FETCH_LIMIT", defaults.feed.fetch_limit)?,
    };

    let polling = PollingConfig {
        interval_seconds: env_parse("TASKDASH_POLL_INTERVAL", defaults.polling.interval_seconds)?,
        enabled: env_bool("TASKDASH_POLL_ENABLED", defaults.polling.enabled),
    };

    let logging = LoggingConfig {
        level: optional_var("TASKDASH_LOG_LEVEL").unwrap_or(defaults.logging.level),
        json: env_bool("TASKDASH_LOG_JSON", defaults.logging.json),
    };

    Ok(Config { api, feed, polling, logging })
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `TaskDashError::Config` if the file is missing, unreadable, or
/// not valid JSON/TOML for [`Config`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) if p.exists() => p,
        Some(p) => {
            return Err(TaskDashError::Config(format!("Config file not found: {}", p.display())));
        }
        None => probe_config_paths().ok_or_else(|| {
            TaskDashError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TaskDashError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Reject values the dashboard cannot run with.
///
/// # Errors
/// Returns `TaskDashError::Config` naming the offending field.
pub fn validate(config: &Config) -> Result<()> {
    if config.api.base_url.trim().is_empty() {
        return Err(TaskDashError::Config("api.base_url must not be empty".into()));
    }
    if config.api.timeout_seconds == 0 {
        return Err(TaskDashError::Config("api.timeout_seconds must be positive".into()));
    }
    if config.feed.max_entries == 0 {
        return Err(TaskDashError::Config("feed.max_entries must be positive".into()));
    }
    if config.feed.fetch_limit == 0 {
        return Err(TaskDashError::Config("feed.fetch_limit must be positive".into()));
    }
    if config.polling.enabled && config.polling.interval_seconds == 0 {
        return Err(TaskDashError::Config("polling.interval_seconds must be positive".into()));
    }
    Ok(())
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TaskDashError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TaskDashError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TaskDashError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn env_var(key: &str) -> Result<String> {
    optional_var(key).ok_or_else(|| {
        TaskDashError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Set and non-blank
fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| TaskDashError::Config(format!("Invalid value for {key} ({raw:?}): {e}"))),
        None => Ok(default),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    optional_var(key)
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
