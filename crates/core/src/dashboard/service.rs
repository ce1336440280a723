//! Dashboard service - joins collection fetches with feed derivation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdash_domain::{ActivityEntry, DashboardStats, FeedConfig, Result};
use tracing::{debug, instrument};

use super::ports::DashboardSource;
use crate::activity::ActivityFeedBuilder;
use crate::stats::compute_dashboard_stats;

/// Everything the dashboard overview renders, taken from one fetch round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub activities: Vec<ActivityEntry>,
    pub stats: DashboardStats,
    pub refreshed_at: DateTime<Utc>,
}

/// Dashboard service
pub struct DashboardService {
    source: Arc<dyn DashboardSource>,
    feed: FeedConfig,
}

impl DashboardService {
    /// Create a new dashboard service
    pub fn new(source: Arc<dyn DashboardSource>, feed: FeedConfig) -> Self {
        Self { source, feed }
    }

    /// Fetch projects, tasks and users concurrently and build the feed.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error; the feed itself cannot fail once the
    /// collections are in hand.
    #[instrument(skip(self))]
    pub async fn recent_activity(&self) -> Result<Vec<ActivityEntry>> {
        let limit = self.feed.fetch_limit;
        let (projects, tasks, users) = tokio::try_join!(
            self.source.fetch_projects(limit),
            self.source.fetch_tasks(limit),
            self.source.fetch_users(),
        )?;

        Ok(self.builder().build(&projects, &tasks, &users))
    }

    /// Fetch projects and tasks concurrently and aggregate overview counts.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats> {
        let limit = self.feed.fetch_limit;
        let (projects, tasks) =
            tokio::try_join!(self.source.fetch_projects(limit), self.source.fetch_tasks(limit))?;

        Ok(compute_dashboard_stats(&projects, &tasks))
    }

    /// Feed and statistics from a single round of three concurrent fetches.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let limit = self.feed.fetch_limit;
        let (projects, tasks, users) = tokio::try_join!(
            self.source.fetch_projects(limit),
            self.source.fetch_tasks(limit),
            self.source.fetch_users(),
        )?;

        let refreshed_at = Utc::now();
        let activities =
            self.builder().with_reference_time(refreshed_at).build(&projects, &tasks, &users);
        let stats = compute_dashboard_stats(&projects, &tasks);

        debug!(
            activities = activities.len(),
            total_tasks = stats.total_tasks,
            "dashboard snapshot built"
        );

        Ok(DashboardSnapshot { activities, stats, refreshed_at })
    }

    fn builder(&self) -> ActivityFeedBuilder {
        ActivityFeedBuilder::new().with_max_entries(self.feed.max_entries)
    }
}
