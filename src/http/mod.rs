//! HTTP client module
//!
//! Thin wrapper over reqwest used for upstream list calls.
//!
//! # Features
//!
//! - **Builder Configuration**: optional timeout and bearer token
//! - **Ordered Query Parameters**: parameters are sent in the order they were added
//! - **Status Classification**: non-success responses become `Error::Upstream`
//!   with the body captured

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
