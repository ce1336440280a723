//! Bearer token supply for API requests

use async_trait::async_trait;

use super::errors::ApiError;

/// Source of the bearer token attached to every request.
///
/// Implementations may refresh tokens; the client asks for a token on every
/// request.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Fixed token, typically taken from configuration
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        if self.token.trim().is_empty() {
            return Err(ApiError::Auth("access token is empty".into()));
        }
        Ok(self.token.clone())
    }
}
