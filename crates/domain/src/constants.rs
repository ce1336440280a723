//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Activity feed
pub const MAX_ACTIVITY_ENTRIES: usize = 20;
pub const DEFAULT_FETCH_LIMIT: u32 = 20;
pub const PROJECT_ENTRY_PREFIX: &str = "project-";
pub const TASK_ENTRY_PREFIX: &str = "task-";

// Placeholder identities and labels
pub const SYSTEM_USER_ID: &str = "system";
pub const SYSTEM_USERNAME: &str = "System";
pub const UNKNOWN_USERNAME: &str = "Unknown User";
pub const UNTITLED_PROJECT: &str = "Untitled Project";
pub const UNTITLED_TASK: &str = "Untitled Task";
pub const PROJECT_CREATED_ACTION: &str = "created project";

// Polling and HTTP defaults
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 200;
