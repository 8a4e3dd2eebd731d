//! HTTP client for upstream calls
//!
//! Provides a small HTTP client that handles:
//! - Bearer authentication
//! - Optional per-call timeout
//! - Error classification of non-success responses
//!
//! Each call is a single attempt; failures are returned to the caller as-is.

use crate::error::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Request timeout; none leaves calls unbounded
    pub timeout: Option<Duration>,
    /// Bearer token added to every request
    pub bearer_token: Option<String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            bearer_token: None,
            user_agent: format!("airtable-proxy/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

impl std::fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("timeout", &self.timeout)
            .field("has_bearer_token", &self.bearer_token.is_some())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set an optional request timeout
    pub fn maybe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Authenticate every request with a bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.bearer_token = Some(token.into());
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Look up the first value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP client for upstream calls
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Make a single GET request and parse the JSON response
    ///
    /// Non-success statuses are turned into `Error::Upstream` carrying the
    /// status code and the response body. The body is read as text first so
    /// a malformed payload is reported as a JSON error rather than a transport
    /// error.
    pub async fn get_json_with_config<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let mut req = self.client.get(url);

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref token) = self.config.bearer_token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed: GET {} -> {}", url, status.as_u16());
            return Err(Error::upstream(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", url);
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
