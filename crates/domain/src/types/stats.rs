//! Dashboard overview statistics

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/* -------------------------------------------------------------------------- */
/* Overview Statistics */
/* -------------------------------------------------------------------------- */

/// Counts shown on the dashboard overview cards and status chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Total number of projects known to the backend
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_projects: u64,

    /// Total number of tasks known to the backend
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub total_tasks: u64,

    /// Completed tasks among the records received
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub completed_tasks: u64,

    /// Pending tasks among the records received
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub pending_tasks: u64,

    /// One bucket per task status, in display order
    pub status_summary: Vec<StatusCount>,
}

/* -------------------------------------------------------------------------- */
/* Status Buckets */
/* -------------------------------------------------------------------------- */

/// Number of tasks in one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct StatusCount {
    /// Display label (`"In Progress"`)
    pub status: String,
    #[cfg_attr(feature = "ts-gen", ts(type = "number"))]
    pub value: u64,
}
