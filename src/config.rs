//! Proxy configuration
//!
//! Built once at process start from environment variables and then passed
//! explicitly into the fetcher and the request handler.

use crate::error::{Error, Result};
use crate::types::{SortDirection, SortSpec};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

// ============================================================================
// Environment Variable Names
// ============================================================================

pub const ENV_API_KEY: &str = "AIRTABLE_API_KEY";
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_TABLE_ID: &str = "AIRTABLE_TABLE_ID";
pub const ENV_FILTER: &str = "AIRTABLE_FILTER";
pub const ENV_SORT_FIELD: &str = "AIRTABLE_SORT_FIELD";
pub const ENV_SORT_DIRECTION: &str = "AIRTABLE_SORT_DIRECTION";
pub const ENV_PAGE_SIZE: &str = "AIRTABLE_PAGE_SIZE";
pub const ENV_API_URL: &str = "AIRTABLE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "AIRTABLE_TIMEOUT_SECS";
pub const ENV_MAX_PAGES: &str = "AIRTABLE_MAX_PAGES";

/// Table used when `AIRTABLE_TABLE_ID` is unset
pub const DEFAULT_TABLE_ID: &str = "Table 1";

/// Public Airtable REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Largest page size the upstream accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Fixed query applied to every list call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryConfig {
    /// Table name or id
    pub table_id: String,
    /// Upstream formula restricting the returned records
    pub filter: Option<String>,
    /// Single-field sort
    pub sort: Option<SortSpec>,
    /// Records per page, 1..=100
    pub page_size: u32,
}

impl QueryConfig {
    /// Query for a table with no filter or sort
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            filter: None,
            sort: None,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Set the filter formula
    #[must_use]
    pub fn filter(mut self, formula: impl Into<String>) -> Self {
        self.filter = Some(formula.into());
        self
    }

    /// Set the sort
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec::new(field, direction));
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Check the page size is within upstream bounds
    pub fn validate(&self) -> Result<()> {
        if self.table_id.trim().is_empty() {
            return Err(Error::invalid_value(ENV_TABLE_ID, "must not be empty"));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                ENV_PAGE_SIZE,
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        Ok(())
    }
}

/// Complete proxy configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Bearer token sent upstream
    pub api_key: String,
    /// Airtable base (workspace) id
    pub base_id: String,
    /// Fixed list query
    pub query: QueryConfig,
    /// Upstream base URL
    pub api_url: String,
    /// Per-call timeout; none means no client-side limit
    pub timeout: Option<Duration>,
    /// Optional cap on pages walked per invocation
    pub max_pages: Option<u32>,
}

impl ProxyConfig {
    /// Create a config with defaults for everything but the credentials
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            query: QueryConfig::new(DEFAULT_TABLE_ID),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
            max_pages: None,
        }
    }

    /// Replace the list query
    #[must_use]
    pub fn with_query(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    /// Point at a different upstream
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the per-call timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the page cap
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).ok_or_else(|| Error::missing_field(ENV_API_KEY))?;
        let base_id = get(ENV_BASE_ID).ok_or_else(|| Error::missing_field(ENV_BASE_ID))?;

        let mut query =
            QueryConfig::new(get(ENV_TABLE_ID).unwrap_or_else(|| DEFAULT_TABLE_ID.to_string()));
        query.filter = get(ENV_FILTER);

        let direction = match get(ENV_SORT_DIRECTION) {
            Some(raw) => raw
                .parse::<SortDirection>()
                .map_err(|_| Error::invalid_value(ENV_SORT_DIRECTION, format!("'{raw}'")))?,
            None => SortDirection::default(),
        };
        query.sort = get(ENV_SORT_FIELD).map(|field| SortSpec::new(field, direction));

        if let Some(raw) = get(ENV_PAGE_SIZE) {
            query.page_size = parse_number(ENV_PAGE_SIZE, &raw)?;
        }
        query.validate()?;

        let mut config = Self::new(api_key, base_id).with_query(query);

        if let Some(url) = get(ENV_API_URL) {
            url::Url::parse(&url)
                .map_err(|e| Error::invalid_value(ENV_API_URL, e.to_string()))?;
            config.api_url = url;
        }

        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = parse_number(ENV_TIMEOUT_SECS, &raw)?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = get(ENV_MAX_PAGES) {
            let max: u32 = parse_number(ENV_MAX_PAGES, &raw)?;
            if max == 0 {
                return Err(Error::invalid_value(ENV_MAX_PAGES, "must be at least 1"));
            }
            config.max_pages = Some(max);
        }

        Ok(config)
    }

    /// Config as printable JSON with the API key redacted
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::json!({
            "apiKey": redact(&self.api_key),
            "baseId": self.base_id,
            "tableId": self.query.table_id,
            "filter": self.query.filter,
            "sort": self.query.sort,
            "pageSize": self.query.page_size,
            "apiUrl": self.api_url,
            "timeoutSecs": self.timeout.map(|t| t.as_secs()),
            "maxPages": self.max_pages,
        })
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_id", &self.base_id)
            .field("query", &self.query)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::invalid_value(field, format!("'{raw}' is not a valid number")))
}

fn redact(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("****{tail}")
    }
}
