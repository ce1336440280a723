//! # TaskDash Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - Task manager REST client (`DashboardSource` implementation)
//! - Configuration loading from environment and files
//! - Logging initialisation
//! - Background feed polling
//!
//! ## Architecture
//! - Implements traits defined in `taskdash-core`
//! - Depends on `taskdash-domain` and `taskdash-core`
//! - Contains all "impure" code (network I/O, timers, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod scheduling;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiError, ApiErrorCategory, StaticTokenProvider, TaskManagerClient,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_logging;
pub use scheduling::{FeedPoller, PollerConfig, SchedulerError, SchedulerResult};
