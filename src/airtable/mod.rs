//! Airtable list endpoint
//!
//! [`AirtableClient`] is the [`PageSource`](crate::pagination::PageSource)
//! for `GET {api_url}/{base_id}/{table_id}` with the configured filter, sort
//! and page size.

mod client;

pub use client::{
    fetch_records, AirtableClient, PARAM_FILTER, PARAM_OFFSET, PARAM_PAGE_SIZE,
    PARAM_SORT_DIRECTION, PARAM_SORT_FIELD,
};
