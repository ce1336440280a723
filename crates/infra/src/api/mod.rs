//! Task manager REST API client
//!
//! Fetches projects, tasks and users from the task manager backend and
//! normalizes every collection into a [`Listing`](taskdash_domain::Listing).
//! Requests carry a bearer token when an [`AccessTokenProvider`] is
//! configured and go through the retrying [`HttpClient`](crate::http::HttpClient).

pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use client::TaskManagerClient;
pub use errors::{ApiError, ApiErrorCategory};
