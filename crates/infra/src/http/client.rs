use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use taskdash_domain::constants::{
    DEFAULT_BASE_BACKOFF_MS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MAX_ATTEMPTS,
};
use taskdash_domain::{ApiConfig, TaskDashError};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// Longest backoff step, as a power of two of the base delay
const MAX_BACKOFF_SHIFT: u32 = 6;

/// HTTP client that retries transient failures with exponential backoff.
///
/// Server errors (5xx), connection failures and timeouts are retried up to
/// `max_attempts` in total. Client errors (4xx) are returned immediately.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with timeout, attempts and backoff taken from the API config.
    ///
    /// # Errors
    ///
    /// Returns `TaskDashError::Network` if the TLS backend cannot be
    /// initialised.
    pub fn from_config(config: &ApiConfig) -> Result<Self, TaskDashError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts)
            .base_backoff(Duration::from_millis(config.base_backoff_ms))
            .user_agent(concat!("taskdash/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Execute the request, retrying transient failures.
    ///
    /// A 5xx on the final attempt is returned as a response so callers can
    /// map the status themselves.
    ///
    /// # Errors
    ///
    /// Returns `TaskDashError::Network` when every attempt failed at the
    /// transport level, and `TaskDashError::Internal` when the request body
    /// is a stream that cannot be replayed.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TaskDashError> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let request = builder
                .try_clone()
                .ok_or_else(|| TaskDashError::Internal("request body cannot be replayed".into()))?
                .build()
                .map_err(|err| TaskDashError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) if response.status().is_server_error() && attempt < attempts => {
                    warn!(
                        attempt,
                        %method,
                        %url,
                        status = %response.status(),
                        "server error; retrying"
                    );
                }
                Ok(response) => {
                    debug!(
                        attempt,
                        %method,
                        %url,
                        status = %response.status(),
                        "received HTTP response"
                    );
                    return Ok(response);
                }
                Err(err) if attempt < attempts && is_transient(&err) => {
                    warn!(attempt, %method, %url, error = %err, "HTTP request failed; retrying");
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                    return Err(InfraError::from(err).into());
                }
            }

            let delay = self.backoff_delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Delay before the retry that follows attempt number `attempt`:
    /// `base`, `2 * base`, `4 * base`, ...
    fn backoff_delay(&self, attempt: usize) -> Duration {
        let shift =
            u32::try_from(attempt.saturating_sub(1)).unwrap_or(u32::MAX).min(MAX_BACKOFF_SHIFT);
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    /// Per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries), at least 1.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// # Errors
    ///
    /// Returns `TaskDashError::Network` if reqwest cannot build the client.
    pub fn build(self) -> Result<HttpClient, TaskDashError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| TaskDashError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
