//! Airtable page fetcher

use crate::config::{ProxyConfig, QueryConfig};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{CollectionFetcher, Page, PageSource, TracingObserver};
use crate::types::Record;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

pub const PARAM_FILTER: &str = "filterByFormula";
pub const PARAM_SORT_FIELD: &str = "sort[0][field]";
pub const PARAM_SORT_DIRECTION: &str = "sort[0][direction]";
pub const PARAM_PAGE_SIZE: &str = "pageSize";
pub const PARAM_OFFSET: &str = "offset";

/// Client for one table's list endpoint
#[derive(Debug)]
pub struct AirtableClient {
    http: HttpClient,
    list_url: String,
    query: QueryConfig,
}

impl AirtableClient {
    /// Create a client from the proxy configuration
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let list_url = list_url(&config.api_url, &config.base_id, &config.query.table_id)?;

        let http_config = HttpClientConfig::builder()
            .bearer_token(&config.api_key)
            .maybe_timeout(config.timeout)
            .build();

        Ok(Self {
            http: HttpClient::with_config(http_config)?,
            list_url,
            query: config.query.clone(),
        })
    }

    /// Fully qualified list endpoint URL
    pub fn list_url(&self) -> &str {
        &self.list_url
    }

    /// Query applied to every page
    pub fn query(&self) -> &QueryConfig {
        &self.query
    }

    /// Build the request for one page
    pub fn page_request(&self, offset: Option<&str>) -> RequestConfig {
        let mut req = RequestConfig::new();

        if let Some(ref filter) = self.query.filter {
            req = req.query(PARAM_FILTER, filter);
        }
        if let Some(ref sort) = self.query.sort {
            req = req
                .query(PARAM_SORT_FIELD, &sort.field)
                .query(PARAM_SORT_DIRECTION, sort.direction.as_str());
        }
        req = req.query(PARAM_PAGE_SIZE, self.query.page_size.to_string());
        if let Some(offset) = offset {
            req = req.query(PARAM_OFFSET, offset);
        }

        req
    }
}

#[async_trait]
impl PageSource for AirtableClient {
    async fn fetch_page(&self, offset: Option<&str>) -> Result<Page> {
        debug!(table = %self.query.table_id, offset = ?offset, "Fetching page");
        self.http
            .get_json_with_config(&self.list_url, self.page_request(offset))
            .await
    }
}

/// Fetch every record the configured query matches
pub async fn fetch_records(config: &ProxyConfig) -> Result<Vec<Record>> {
    let client = AirtableClient::new(config)?;
    CollectionFetcher::new(client)
        .with_observer(TracingObserver::new(&config.query.table_id))
        .with_max_pages(config.max_pages)
        .fetch_all()
        .await
}

/// Join base and table onto the API URL as path segments
///
/// Segments are percent-encoded, so table names with spaces work.
pub(crate) fn list_url(api_url: &str, base_id: &str, table_id: &str) -> Result<String> {
    let mut url = Url::parse(api_url)?;
    url.path_segments_mut()
        .map_err(|()| Error::invalid_value("api_url", format!("'{api_url}' cannot be a base")))?
        .pop_if_empty()
        .push(base_id)
        .push(table_id);
    Ok(url.into())
}
