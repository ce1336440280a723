//! API-specific error types
//!
//! Provides error classification for task manager API calls with retry
//! metadata.

use std::time::Duration;

use reqwest::StatusCode;
use taskdash_domain::TaskDashError;
use thiserror::Error;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401, 403 - retry after the token is refreshed
    Authentication,
    /// 429
    RateLimit,
    /// 5xx
    Server,
    /// 4xx other than auth and rate limiting
    Client,
    /// Connection failures and timeouts
    Network,
    /// Unusable payloads
    Decode,
    /// Bad client configuration
    Config,
}

/// Task manager API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    pub const fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) | Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Whether a later attempt (e.g. the next poll) may succeed
    pub const fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::Authentication
                | ApiErrorCategory::RateLimit
                | ApiErrorCategory::Server
                | ApiErrorCategory::Network
        )
    }

    /// Suggested wait before retrying, in seconds
    pub const fn retry_delay_secs(&self) -> u64 {
        match self.category() {
            ApiErrorCategory::Authentication | ApiErrorCategory::Network => 5,
            ApiErrorCategory::RateLimit => 60,
            ApiErrorCategory::Server => 10,
            ApiErrorCategory::Client | ApiErrorCategory::Decode | ApiErrorCategory::Config => 0,
        }
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode, url: &str, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {}", body.trim())
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit(message),
            s if s.is_server_error() => Self::Server(message),
            s if s.is_client_error() => Self::Client(message),
            _ => Self::Network(message),
        }
    }
}

impl From<TaskDashError> for ApiError {
    fn from(err: TaskDashError) -> Self {
        match err {
            TaskDashError::Network(message) | TaskDashError::Internal(message) => {
                Self::Network(message)
            }
            TaskDashError::Auth(message) => Self::Auth(message),
            TaskDashError::NotFound(message) => Self::NotFound(message),
            TaskDashError::InvalidInput(message) => Self::Client(message),
            TaskDashError::MalformedShape(message) | TaskDashError::Decode(message) => {
                Self::Decode(message)
            }
            TaskDashError::Config(message) => Self::Config(message),
        }
    }
}

impl From<ApiError> for TaskDashError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err {
            ApiError::Auth(_) => Self::Auth(message),
            ApiError::NotFound(_) => Self::NotFound(message),
            ApiError::Client(_) => Self::InvalidInput(message),
            ApiError::Decode(_) => Self::Decode(message),
            ApiError::Config(_) => Self::Config(message),
            ApiError::RateLimit(_)
            | ApiError::Server(_)
            | ApiError::Network(_)
            | ApiError::Timeout(_) => Self::Network(message),
        }
    }
}
