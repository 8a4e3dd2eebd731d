//! Pagination module
//!
//! Walks an offset-token paginated list endpoint into one ordered collection.
//!
//! # Overview
//!
//! A [`PageSource`] performs one upstream call for a given continuation token.
//! The [`CollectionFetcher`] drives it from no token until a page comes back
//! without one, concatenating records in fetch order. The first error aborts
//! the walk and discards everything accumulated so far.

mod fetcher;
mod types;

pub use fetcher::{fetch_all, CollectionFetcher};
pub use types::{
    NoopObserver, Page, PageObserver, PageProgress, PageSource, PaginationState,
    TracingObserver,
};
