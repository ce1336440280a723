//! Periodic dashboard refresh
//!
//! Spawns a background loop that rebuilds the [`DashboardSnapshot`] every
//! `interval`, starting immediately. A failed refresh keeps the previous
//! snapshot visible and is counted in [`PollerHealth`]; subscribers only see
//! successful refreshes.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use taskdash_core::{DashboardService, DashboardSnapshot};
use taskdash_domain::{PollingConfig, Result as DomainResult};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::error::{SchedulerError, SchedulerResult};

type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;
type SnapshotSender = Arc<watch::Sender<Option<Arc<DashboardSnapshot>>>>;

const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Poller configuration
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::from(&PollingConfig::default())
    }
}

impl From<&PollingConfig> for PollerConfig {
    fn from(config: &PollingConfig) -> Self {
        Self { interval: Duration::from_secs(config.interval_seconds.max(1)) }
    }
}

/// Outcome counters of the refresh loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollerHealth {
    pub successful_refreshes: u64,
    pub failed_refreshes: u64,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
    pub last_success_at: Option<DateTime<Utc>>,
}

/// Keeps a dashboard snapshot fresh in the background
pub struct FeedPoller {
    service: Arc<DashboardService>,
    config: PollerConfig,
    snapshots: SnapshotSender,
    health: Arc<Mutex<PollerHealth>>,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl FeedPoller {
    pub fn new(service: Arc<DashboardService>, config: PollerConfig) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            service,
            config,
            snapshots: Arc::new(sender),
            health: Arc::new(Mutex::new(PollerHealth::default())),
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Spawn the refresh loop.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyRunning`] if the loop is active.
    #[instrument(skip(self), fields(interval = ?self.config.interval))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        let mut handle_slot = self.task_handle.lock().await;
        if handle_slot.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }

        // Fresh token so the poller can be restarted after stop
        self.cancellation_token = CancellationToken::new();

        let service = Arc::clone(&self.service);
        let snapshots = Arc::clone(&self.snapshots);
        let health = Arc::clone(&self.health);
        let interval = self.config.interval;
        let cancel = self.cancellation_token.clone();

        *handle_slot = Some(tokio::spawn(async move {
            Self::poll_loop(service, snapshots, health, interval, cancel).await;
        }));

        info!("Feed poller started");
        Ok(())
    }

    /// Cancel the loop and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotRunning`] if the loop is not active, and
    /// a timeout or join error if it does not shut down cleanly.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        let handle = self.task_handle.lock().await.take().ok_or(SchedulerError::NotRunning)?;

        self.cancellation_token.cancel();

        match tokio::time::timeout(STOP_TIMEOUT, handle).await {
            Ok(Ok(())) => {
                info!("Feed poller stopped");
                Ok(())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Feed poller task failed");
                Err(SchedulerError::TaskJoinFailed(e.to_string()))
            }
            Err(_) => {
                warn!("Feed poller did not stop within timeout");
                Err(SchedulerError::Timeout { seconds: STOP_TIMEOUT.as_secs() })
            }
        }
    }

    pub async fn is_running(&self) -> bool {
        self.task_handle.lock().await.is_some()
    }

    /// Most recent successful snapshot, possibly stale
    pub fn latest(&self) -> Option<Arc<DashboardSnapshot>> {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every successful refresh
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<DashboardSnapshot>>> {
        self.snapshots.subscribe()
    }

    pub async fn health(&self) -> PollerHealth {
        self.health.lock().await.clone()
    }

    /// Refresh once outside the schedule.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous snapshot stays in place.
    pub async fn refresh_now(&self) -> DomainResult<Arc<DashboardSnapshot>> {
        Self::refresh(&self.service, &self.snapshots, &self.health).await
    }

    async fn poll_loop(
        service: Arc<DashboardService>,
        snapshots: SnapshotSender,
        health: Arc<Mutex<PollerHealth>>,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = Self::refresh(&service, &snapshots, &health) => {}
            }

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }

        debug!("Feed poll loop cancelled");
    }

    async fn refresh(
        service: &DashboardService,
        snapshots: &SnapshotSender,
        health: &Mutex<PollerHealth>,
    ) -> DomainResult<Arc<DashboardSnapshot>> {
        match service.snapshot().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                {
                    let mut health = health.lock().await;
                    health.successful_refreshes += 1;
                    health.consecutive_failures = 0;
                    health.last_error = None;
                    health.last_success_at = Some(snapshot.refreshed_at);
                }
                debug!(activities = snapshot.activities.len(), "dashboard refreshed");
                snapshots.send_replace(Some(Arc::clone(&snapshot)));
                Ok(snapshot)
            }
            Err(err) => {
                let consecutive = {
                    let mut health = health.lock().await;
                    health.failed_refreshes += 1;
                    health.consecutive_failures = health.consecutive_failures.saturating_add(1);
                    health.last_error = Some(err.to_string());
                    health.consecutive_failures
                };
                warn!(
                    error = %err,
                    consecutive_failures = consecutive,
                    "dashboard refresh failed; keeping previous snapshot"
                );
                Err(err)
            }
        }
    }
}

impl Drop for FeedPoller {
    fn drop(&mut self) {
        if !self.cancellation_token.is_cancelled() {
            if let Ok(handle) = self.task_handle.try_lock() {
                if handle.is_some() {
                    warn!("FeedPoller dropped while running; cancelling");
                }
            }
            self.cancellation_token.cancel();
        }
    }
}
