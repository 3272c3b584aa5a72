//! HTTP client wrapper for the Sico license backend.

use std::fmt;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{send_error, Result};
use crate::models::{
    Anlage, DeleteRequest, DeleteResponse, LicenseRequest, LicenseResponse, LoginRequest,
    LoginResponse, Product,
};
use crate::retry::{
    execute_with_retry, RetryConfig, DEFAULT_INITIAL_BACKOFF_SECS, DEFAULT_MAX_BACKOFF_SECS,
    DEFAULT_MAX_RETRIES,
};

/// Default base URL of the license backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the license backend.
#[derive(Clone)]
pub struct SicoClient {
    token: Option<String>,
    http_client: reqwest::Client,
    base_url: String,
    retry_config: RetryConfig,
}

/// Builder for [`SicoClient`].
#[derive(Debug, Clone)]
pub struct SicoClientBuilder {
    base_url: String,
    token: Option<String>,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    request_timeout: Duration,
}

impl SicoClientBuilder {
    /// Creates a builder pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the session token sent as a bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the maximum number of retries on HTTP 429.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the first backoff interval.
    pub fn initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Sets the backoff cap.
    pub fn max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<SicoClient> {
        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        Ok(SicoClient {
            token: self.token,
            http_client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            retry_config: RetryConfig {
                max_retries: self.max_retries,
                initial_backoff: self.initial_backoff,
                max_backoff: self.max_backoff,
            },
        })
    }
}

impl SicoClient {
    /// Creates an unauthenticated client with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        SicoClientBuilder::new(base_url).build()
    }

    /// Creates a client that authenticates with the given session token.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        SicoClientBuilder::new(base_url).token(token).build()
    }

    /// Returns the session token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured number of retries.
    pub fn max_retries(&self) -> u32 {
        self.retry_config.max_retries
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Performs a GET request with query parameters.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%url, "GET");

        execute_with_retry(&self.retry_config, || {
            let request = self.authorize(self.http_client.get(&url).query(query));
            async move { request.send().await.map_err(send_error) }
        })
        .await
    }

    /// Performs a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> Result<T> {
        let url = self.url(endpoint);
        debug!(%url, "POST");

        execute_with_retry(&self.retry_config, || {
            let request = self.authorize(self.http_client.post(&url).json(body));
            async move { request.send().await.map_err(send_error) }
        })
        .await
    }

    /// Logs in and returns the session information.
    ///
    /// A response with `success == false` is returned as-is; callers decide
    /// how to report rejected credentials.
    pub async fn login(&self, user_name: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            user_name: user_name.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/login", &body).await
    }

    /// Fetches all anlagen of a product visible to the given user.
    pub async fn get_projects(&self, product: Product, user_name: &str) -> Result<Vec<Anlage>> {
        let endpoint = format!("/api/projects/{}", product.as_str());
        self.get(&endpoint, &[("userName", user_name)]).await
    }

    /// Creates (or regenerates) a license.
    pub async fn create_license(
        &self,
        product: Product,
        request: &LicenseRequest,
    ) -> Result<LicenseResponse> {
        let endpoint = format!("/api/licenses/{}", product.as_str());
        self.post(&endpoint, request).await
    }

    /// Deletes a license.
    pub async fn delete_license(
        &self,
        product: Product,
        request: &DeleteRequest,
    ) -> Result<DeleteResponse> {
        let endpoint = format!("/api/licenses/{}/delete", product.as_str());
        self.post(&endpoint, request).await
    }
}

impl fmt::Debug for SicoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SicoClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("retry_config", &self.retry_config)
            .finish()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
