//! Pure utility functions

pub mod time;
