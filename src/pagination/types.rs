//! Pagination types and traits
//!
//! Defines the page abstraction shared by the fetch loop and page sources.

use crate::error::Result;
use crate::types::Record;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// One batch of records returned by a single upstream call
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Page {
    /// Records in upstream order; missing or null in the body means none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub records: Vec<Record>,
    /// Continuation token; absent or null means this is the last page
    #[serde(default)]
    pub offset: Option<String>,
}

impl Page {
    /// Create a page
    pub fn new(records: Vec<Record>, offset: Option<String>) -> Self {
        Self { records, offset }
    }

    /// Create a final page
    pub fn last(records: Vec<Record>) -> Self {
        Self::new(records, None)
    }

    /// Check if more pages follow this one
    pub fn has_more(&self) -> bool {
        self.offset.is_some()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of pages, typically one upstream list endpoint
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page identified by `offset` (`None` for the first page)
    ///
    /// The token must be forwarded exactly as it was received.
    async fn fetch_page(&self, offset: Option<&str>) -> Result<Page>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    async fn fetch_page(&self, offset: Option<&str>) -> Result<Page> {
        (**self).fetch_page(offset).await
    }
}

/// Progress report emitted after every page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based page number
    pub page: u32,
    /// Records on this page
    pub fetched: usize,
    /// Records accumulated so far, this page included
    pub total: usize,
    /// Whether another page will be requested
    pub has_more: bool,
}

/// Receives per-page progress from the fetch loop
pub trait PageObserver: Send + Sync {
    fn on_page(&self, progress: &PageProgress);
}

impl<F> PageObserver for F
where
    F: Fn(&PageProgress) + Send + Sync,
{
    fn on_page(&self, progress: &PageProgress) {
        self(progress);
    }
}

/// Observer that ignores progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PageObserver for NoopObserver {
    fn on_page(&self, _progress: &PageProgress) {}
}

/// Observer that logs progress through `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    label: String,
}

impl TracingObserver {
    /// Create an observer tagging log lines with `label`
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PageObserver for TracingObserver {
    fn on_page(&self, progress: &PageProgress) {
        debug!(
            table = %self.label,
            page = progress.page,
            fetched = progress.fetched,
            total = progress.total,
            has_more = progress.has_more,
            "Page {}: fetched {} records ({} total)",
            progress.page,
            progress.fetched,
            progress.total
        );
    }
}

/// Tracks pagination state during one walk
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub page: u32,
    /// Token for the next request
    pub offset: Option<String>,
    /// Total records fetched so far
    pub total_fetched: usize,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a fetched page into the state
    ///
    /// The page's token replaces the working token; an absent token ends the walk.
    pub fn advance(&mut self, page: &Page) -> PageProgress {
        self.page += 1;
        self.total_fetched += page.records.len();
        self.offset.clone_from(&page.offset);
        self.done = page.offset.is_none();

        PageProgress {
            page: self.page,
            fetched: page.records.len(),
            total: self.total_fetched,
            has_more: !self.done,
        }
    }
}
