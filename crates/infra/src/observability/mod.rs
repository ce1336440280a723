//! Observability infrastructure
//!
//! Library code only emits `tracing` events; binaries call
//! [`init_logging`] once at startup to install a subscriber.

pub mod logging;

pub use logging::{build_filter, init_logging};
