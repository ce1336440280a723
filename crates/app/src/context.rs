//! Application context - dependency injection container

use std::sync::Arc;

use taskdash_core::{DashboardService, DashboardSnapshot};
use taskdash_domain::{Config, Result};
use taskdash_infra::config;
use taskdash_infra::{FeedPoller, PollerConfig, TaskManagerClient};
use tracing::info;

/// Application context - holds the configured services
pub struct AppContext {
    pub config: Config,
    pub service: Arc<DashboardService>,
}

impl AppContext {
    /// Build the services for an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `TaskDashError::Config` if the configuration is invalid or
    /// the API client cannot be created from it.
    pub fn new(config: Config) -> Result<Self> {
        config::validate(&config)?;

        let client = TaskManagerClient::new(&config.api)?;
        info!(base_url = %client.base_url(), "Task manager client ready");

        let service = Arc::new(DashboardService::new(Arc::new(client), config.feed.clone()));

        Ok(Self { config, service })
    }

    /// Fetch everything once and build a snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        self.service.snapshot().await
    }

    /// A poller on the configured interval; not started.
    pub fn poller(&self) -> FeedPoller {
        FeedPoller::new(Arc::clone(&self.service), PollerConfig::from(&self.config.polling))
    }
}
