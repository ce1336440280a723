//! Domain types and models

pub mod activity;
pub mod filters;
pub mod listing;
pub mod records;
pub mod stats;

pub use activity::{ActivityEntry, ActivityMetadata, ActivityType, ActivityUser, TargetType};
pub use filters::TaskFilters;
pub use listing::{Listing, Page};
pub use records::{
    present_id, OwnerField, ProjectRecord, RecordId, TaskPriority, TaskRecord, TaskStatus,
    UserRecord, UserRef, UserRole,
};
pub use stats::{DashboardStats, StatusCount};
