//! Port interfaces for fetching dashboard collections
//!
//! These traits define the boundary between core business logic and the
//! HTTP implementation in `taskdash-infra`.

use async_trait::async_trait;
use taskdash_domain::{Listing, ProjectRecord, Result, TaskRecord, UserRecord};

/// Read-only access to the task manager's collections
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// Newest `limit` projects, bare or paginated as the backend returns them
    async fn fetch_projects(&self, limit: u32) -> Result<Listing<ProjectRecord>>;

    /// Newest `limit` tasks, bare or paginated as the backend returns them
    async fn fetch_tasks(&self, limit: u32) -> Result<Listing<TaskRecord>>;

    /// Every user, for resolving owner/assignee/creator references
    async fn fetch_users(&self) -> Result<Vec<UserRecord>>;
}
