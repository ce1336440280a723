//! Background refresh scheduling
//!
//! Schedulers follow the same lifecycle rules:
//! - Explicit `start`/`stop`
//! - Join handles kept for spawned tasks
//! - Cancellation token support, cancelled on drop
//! - Timeout on shutdown

pub mod error;
pub mod feed_poller;

pub use error::{SchedulerError, SchedulerResult};
pub use feed_poller::{FeedPoller, PollerConfig, PollerHealth};
