//! # TaskDash App
//!
//! Wires configuration, the task manager client, the dashboard service and
//! the feed poller together for the `taskdash` binary.

pub mod context;

pub use context::AppContext;
