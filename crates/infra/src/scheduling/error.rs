//! Scheduler error types

use taskdash_domain::TaskDashError;
use thiserror::Error;

use crate::errors::InfraError;

/// Scheduler lifecycle errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Scheduler already running")]
    AlreadyRunning,

    #[error("Scheduler not running")]
    NotRunning,

    /// Background task did not finish within the stop timeout
    #[error("Operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Task join failed: {0}")]
    TaskJoinFailed(String),
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let domain = match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                TaskDashError::InvalidInput(err.to_string())
            }
            SchedulerError::Timeout { .. } | SchedulerError::TaskJoinFailed(_) => {
                TaskDashError::Internal(err.to_string())
            }
        };
        InfraError(domain)
    }
}

impl From<SchedulerError> for TaskDashError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

/// Convenience type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;
