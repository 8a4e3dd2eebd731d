//! Error types for the Airtable proxy
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The main error type for the Airtable proxy
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Upstream Errors
    // ============================================================================
    #[error("Airtable API error: {status} - {body}")]
    Upstream { status: u16, body: UpstreamBody },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Pagination exceeded {max_pages} pages")]
    TooManyPages { max_pages: u32 },

    #[error("{0}")]
    Other(String),
}

/// Body of a non-success upstream response
///
/// Kept as parsed JSON when the upstream sent valid JSON, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    Text(String),
}

impl UpstreamBody {
    /// Classify a raw response body
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

impl fmt::Display for UpstreamBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Caller-facing error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    PermissionDenied,
    NotFound,
    InvalidRequest,
    RateLimited,
    MethodNotAllowed,
    ServerConfiguration,
    Internal,
}

impl ErrorCategory {
    /// Map an upstream status code to a category
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            422 => Self::InvalidRequest,
            429 => Self::RateLimited,
            _ => Self::Internal,
        }
    }

    /// HTTP status returned to the caller
    pub fn status_code(self) -> u16 {
        match self {
            Self::Authentication => 401,
            Self::PermissionDenied => 403,
            Self::NotFound => 404,
            Self::InvalidRequest => 422,
            Self::RateLimited => 429,
            Self::MethodNotAllowed => 405,
            Self::ServerConfiguration | Self::Internal => 500,
        }
    }

    /// Label used in the `error` field of failure payloads
    pub fn label(self) -> &'static str {
        match self {
            Self::Authentication => "Authentication error",
            Self::PermissionDenied => "Permission denied",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::RateLimited => "Rate limit exceeded",
            Self::MethodNotAllowed => "Method not allowed",
            Self::ServerConfiguration => "Server configuration error",
            Self::Internal => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an upstream error from a status and raw body text
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: UpstreamBody::from_text(body),
        }
    }

    /// Upstream status code, if this error came from a non-success response
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a configuration problem
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::MissingConfigField { .. } | Self::InvalidConfigValue { .. }
        )
    }

    /// Caller-facing category
    ///
    /// Upstream failures are classified on their numeric status; transport
    /// failures fall into the internal bucket.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Upstream { status, .. } => ErrorCategory::from_status(*status),
            e if e.is_config() => ErrorCategory::ServerConfiguration,
            _ => ErrorCategory::Internal,
        }
    }

    /// Caller-facing HTTP status
    pub fn status_code(&self) -> u16 {
        self.category().status_code()
    }
}

/// Result type alias for the Airtable proxy
pub type Result<T> = std::result::Result<T, Error>;
