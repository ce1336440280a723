//! In-memory `DashboardSource` for service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use taskdash_core::DashboardSource;
use taskdash_domain::{
    Listing, ProjectRecord, Result as DomainResult, TaskDashError, TaskRecord, UserRecord,
};

/// Serves fixed JSON payloads through the same normalization the HTTP client
/// uses. Each collection can be made to fail.
#[derive(Default)]
pub struct MockDashboardSource {
    projects: Value,
    tasks: Value,
    users: Value,
    failing_users: bool,
    calls: Arc<AtomicUsize>,
    last_limit: Arc<AtomicUsize>,
}

impl MockDashboardSource {
    pub fn new(projects: Value, tasks: Value, users: Value) -> Self {
        Self { projects, tasks, users, ..Default::default() }
    }

    /// Make `fetch_users` fail with a network error.
    pub fn with_failing_users(mut self) -> Self {
        self.failing_users = true;
        self
    }

    /// Total number of fetch calls served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Limit passed to the most recent project/task fetch
    pub fn last_limit(&self) -> usize {
        self.last_limit.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardSource for MockDashboardSource {
    async fn fetch_projects(&self, limit: u32) -> DomainResult<Listing<ProjectRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit as usize, Ordering::SeqCst);
        Listing::from_value(&self.projects)
    }

    async fn fetch_tasks(&self, limit: u32) -> DomainResult<Listing<TaskRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_limit.store(limit as usize, Ordering::SeqCst);
        Listing::from_value(&self.tasks)
    }

    async fn fetch_users(&self) -> DomainResult<Vec<UserRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_users {
            return Err(TaskDashError::Network("users endpoint unavailable".into()));
        }
        Listing::from_value(&self.users).map(Listing::into_items)
    }
}
