//! HTTP client for the task manager backend

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdash_core::DashboardSource;
use taskdash_domain::{
    ApiConfig, Listing, ProjectRecord, Result as DomainResult, TaskFilters, TaskRecord, UserRecord,
};
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{AccessTokenProvider, StaticTokenProvider};
use super::errors::ApiError;
use crate::http::HttpClient;

const PROJECTS_PATH: &str = "v1/projects";
const TASKS_PATH: &str = "v1/tasks";
const USERS_PATH: &str = "v1/users";

/// Newest projects first
const PROJECT_SORT: &str = "createdAt,desc";
/// Most recently touched tasks first
const TASK_SORT: &str = "updatedAt,desc";

/// Read-only client for `/v1/projects`, `/v1/tasks` and `/v1/users`
pub struct TaskManagerClient {
    http: HttpClient,
    base_url: Url,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl TaskManagerClient {
    /// Client for `config.base_url`, authenticating with
    /// `config.access_token` when one is set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::from_config(config)
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;
        let client = Self::with_http_client(http, &config.base_url)?;

        Ok(match config.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(token) => client.with_auth(Arc::new(StaticTokenProvider::new(token))),
            None => client,
        })
    }

    /// # Errors
    ///
    /// Returns `ApiError::Config` if `base_url` is not an absolute http(s) URL.
    pub fn with_http_client(http: HttpClient, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self { http, base_url: normalize_base_url(base_url)?, auth: None })
    }

    #[must_use]
    pub fn with_auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// One page of projects, newest first.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and payloads that are
    /// neither a list nor an envelope.
    #[instrument(skip(self))]
    pub async fn list_projects(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Listing<ProjectRecord>, ApiError> {
        let query = [
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("sort", PROJECT_SORT.to_string()),
        ];
        self.get_listing(PROJECTS_PATH, &query).await
    }

    /// One page of tasks matching `filters`, most recently updated first.
    ///
    /// An envelope that reports `total > 0` but carries no records is a
    /// known backend inconsistency; it is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// See [`Self::list_projects`].
    #[instrument(skip(self, filters))]
    pub async fn list_tasks(
        &self,
        filters: &TaskFilters,
        page: u32,
        size: u32,
    ) -> Result<Listing<TaskRecord>, ApiError> {
        let mut query = filters.to_query_pairs(page, size);
        query.push(("sort", TASK_SORT.to_string()));

        let listing: Listing<TaskRecord> = self.get_listing(TASKS_PATH, &query).await?;

        if let Listing::Paged(envelope) = &listing {
            if envelope.total > 0 && envelope.data.is_empty() {
                warn!(
                    total = envelope.total,
                    page = envelope.page,
                    "API returned total > 0 but empty data array; treating as empty"
                );
                return Ok(Listing::default());
            }
        }

        Ok(listing)
    }

    /// Every user.
    ///
    /// # Errors
    ///
    /// See [`Self::list_projects`].
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get_listing::<UserRecord>(USERS_PATH, &[]).await.map(Listing::into_items)
    }

    async fn get_listing<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Listing<T>, ApiError> {
        let body: Value = self.get_json(path, query).await?;
        let listing = Listing::from_value(&body)?;

        debug!(
            path,
            records = listing.len(),
            paginated = listing.is_paginated(),
            "decoded listing"
        );
        Ok(listing)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;

        let mut request =
            self.http.request(Method::GET, url.clone()).header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(auth) = &self.auth {
            let token = auth.access_token().await?;
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, url.as_str(), &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response from {url}: {e}")))?;

        // 204 and empty bodies read as "no records"
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response from {url}: {e}")))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Config(format!("Invalid endpoint {path}: {e}")))
    }
}

#[async_trait]
impl DashboardSource for TaskManagerClient {
    async fn fetch_projects(&self, limit: u32) -> DomainResult<Listing<ProjectRecord>> {
        Ok(self.list_projects(1, limit).await?)
    }

    async fn fetch_tasks(&self, limit: u32) -> DomainResult<Listing<TaskRecord>> {
        Ok(self.list_tasks(&TaskFilters::default(), 1, limit).await?)
    }

    async fn fetch_users(&self) -> DomainResult<Vec<UserRecord>> {
        Ok(self.list_users().await?)
    }
}

/// Parse the base URL and make sure relative joins append to its path.
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ApiError::Config(format!("Invalid base URL {raw:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!("Unsupported base URL scheme: {}", url.scheme())));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = normalize_base_url("http://localhost:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
        assert_eq!(url.join(TASKS_PATH).unwrap().as_str(), "http://localhost:8080/api/v1/tasks");
    }

    #[test]
    fn bare_host_base_url() {
        let url = normalize_base_url("https://tasks.example.com").unwrap();
        assert_eq!(url.join(USERS_PATH).unwrap().as_str(), "https://tasks.example.com/v1/users");
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(matches!(normalize_base_url("not a url"), Err(ApiError::Config(_))));
        assert!(matches!(normalize_base_url("ftp://files.example.com"), Err(ApiError::Config(_))));
    }

    #[test]
    fn config_token_enables_auth() {
        let config = ApiConfig { access_token: Some("abc".into()), ..ApiConfig::default() };
        assert!(TaskManagerClient::new(&config).unwrap().auth.is_some());

        let blank = ApiConfig { access_token: Some(" ".into()), ..ApiConfig::default() };
        assert!(TaskManagerClient::new(&blank).unwrap().auth.is_none());
    }
}
