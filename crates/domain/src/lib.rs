//! # TaskDash Domain
//!
//! Business domain types and models for TaskDash.
//!
//! This crate contains:
//! - Wire records returned by the task manager API (projects, tasks, users)
//! - The `Listing` union that absorbs bare-list and paginated responses
//! - Derived dashboard types (activity entries, statistics)
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other TaskDash crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::time::{format_date, format_relative_time, parse_timestamp};
