//! Dashboard data service

pub mod ports;
pub mod service;

pub use service::{DashboardService, DashboardSnapshot};
