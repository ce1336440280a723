//! Shared test helpers for `taskdash-core` integration tests.
//!
//! These helpers provide JSON fixtures shaped like real task manager
//! payloads and an in-memory `DashboardSource` so tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod source;
