//! Full-collection fetch loop
//!
//! `START -> FETCHING(none) -> FETCHING(next) -> ... -> DONE`, or `FAILED` on
//! the first error. Pages are requested strictly one after another since the
//! token for page N+1 is only known once page N has been read.

use super::types::{NoopObserver, PageObserver, PageSource, PaginationState};
use crate::error::{Error, Result};
use crate::types::Record;
use std::sync::Arc;
use tracing::debug;

/// Drives a [`PageSource`] until the upstream stops returning a token
pub struct CollectionFetcher<S> {
    source: S,
    observer: Arc<dyn PageObserver>,
    max_pages: Option<u32>,
}

impl<S: PageSource> CollectionFetcher<S> {
    /// Create a fetcher with no observer and no page cap
    pub fn new(source: S) -> Self {
        Self {
            source,
            observer: Arc::new(NoopObserver),
            max_pages: None,
        }
    }

    /// Report per-page progress to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: impl PageObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Fail with `TooManyPages` instead of requesting more than `max_pages`
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Get the page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every page and return the concatenated records
    ///
    /// Output order is page order, then within-page order. Records are not
    /// re-sorted or deduplicated.
    pub async fn fetch_all(&self) -> Result<Vec<Record>> {
        let mut state = PaginationState::new();
        let mut records = Vec::new();

        loop {
            let page = self.source.fetch_page(state.offset.as_deref()).await?;
            let progress = state.advance(&page);
            records.extend(page.records);
            self.observer.on_page(&progress);

            if state.done {
                break;
            }

            if let Some(max_pages) = self.max_pages {
                if state.page >= max_pages {
                    return Err(Error::TooManyPages { max_pages });
                }
            }
        }

        debug!(
            "Fetched {} records across {} pages",
            records.len(),
            state.page
        );
        Ok(records)
    }
}

/// Fetch every page from `source` with no observer and no cap
pub async fn fetch_all<S: PageSource>(source: S) -> Result<Vec<Record>> {
    CollectionFetcher::new(source).fetch_all().await
}
