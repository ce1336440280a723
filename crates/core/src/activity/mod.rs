//! Recent-activity feed derivation
//!
//! Turns independently fetched project, task and user collections into a
//! capped, de-duplicated, newest-first list of [`ActivityEntry`] values.
//!
//! [`ActivityEntry`]: taskdash_domain::ActivityEntry

pub mod builder;
pub mod users;

pub use builder::{build_activity_feed, classify_task, try_build_activity_feed, ActivityFeedBuilder};
pub use users::UserDirectory;
