//! `tracing-subscriber` setup

use taskdash_domain::{LoggingConfig, Result, TaskDashError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, else from the configured level.
///
/// # Errors
/// Returns `TaskDashError::Config` if the configured directive is invalid.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(config.level.trim())
        .map_err(|e| TaskDashError::Config(format!("Invalid log level {:?}: {e}", config.level)))
}

/// Install the global subscriber: plain text to stderr, or JSON lines when
/// `config.json` is set.
///
/// # Errors
/// Returns `TaskDashError::Config` for an invalid filter directive and
/// `TaskDashError::Internal` if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).try_init()
    };

    result.map_err(|e| TaskDashError::Internal(format!("Failed to install log subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_config_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig { level: "taskdash=loud".into(), json: false };
        assert!(matches!(build_filter(&config), Err(TaskDashError::Config(_))));
    }

    #[test]
    fn level_directive_is_accepted() {
        let config = LoggingConfig { level: "warn,taskdash_core=debug".into(), json: true };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn second_init_fails() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(TaskDashError::Internal(_))));
    }
}
