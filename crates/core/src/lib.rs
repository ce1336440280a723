//! # TaskDash Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Activity feed derivation from projects, tasks and users
//! - Dashboard statistics aggregation
//! - Port interfaces (traits) for fetching dashboard collections
//! - The dashboard service that joins fetches and derivation
//!
//! ## Architecture Principles
//! - Only depends on `taskdash-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod activity;
pub mod dashboard;
pub mod stats;

// Re-export specific items to avoid ambiguity
pub use activity::{
    build_activity_feed, classify_task, try_build_activity_feed, ActivityFeedBuilder,
    UserDirectory,
};
pub use dashboard::ports::DashboardSource;
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use stats::compute_dashboard_stats;
