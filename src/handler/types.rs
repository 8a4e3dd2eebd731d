//! Response envelopes

use crate::config::ProxyConfig;
use crate::error::{Error, ErrorCategory};
use crate::types::{Record, SortSpec};
use serde::Serialize;

/// Successful response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsResponse {
    pub success: bool,
    pub records: Vec<Record>,
    pub total_records: usize,
    pub table: String,
    pub filter: Option<String>,
    pub sort: Option<SortSpec>,
}

impl RecordsResponse {
    /// Wrap fetched records with the query that produced them
    pub fn new(config: &ProxyConfig, records: Vec<Record>) -> Self {
        Self {
            success: true,
            total_records: records.len(),
            records,
            table: config.query.table_id.clone(),
            filter: config.query.filter.clone(),
            sort: config.query.sort.clone(),
        }
    }
}

/// Failure response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: category.label().to_string(),
            message: message.into(),
        }
    }

    /// Build the failure body for an error
    pub fn from_error(err: &Error) -> Self {
        Self::new(err.category(), err.to_string())
    }
}
