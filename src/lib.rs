//! # Airtable Proxy
//!
//! A read-only HTTP function that lists one Airtable table with a fixed
//! filter and sort, walks every page of the result, and answers with a
//! single JSON envelope.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airtable_proxy::{airtable::fetch_records, ProxyConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ProxyConfig::from_env()?;
//!     let records = fetch_records(&config).await?;
//!     println!("{} records", records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ handler: GET -> envelope, CORS, status mapping            │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//! ┌───────────────────────────┴──────────────────────────────┐
//! │ pagination::CollectionFetcher (loop until no offset)     │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ PageSource
//! ┌───────────────────────────┴──────────────────────────────┐
//! │ airtable::AirtableClient (one GET per page) over http    │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Environment-driven configuration
pub mod config;

/// HTTP client
pub mod http;

/// Offset-token pagination loop
pub mod pagination;

/// Airtable list endpoint
pub mod airtable;

/// Inbound request handler
pub mod handler;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ProxyConfig, QueryConfig};
pub use error::{Error, ErrorCategory, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
