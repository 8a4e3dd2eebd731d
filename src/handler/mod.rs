//! Inbound HTTP handler
//!
//! Accepts `GET`, walks the configured table and answers with the records
//! envelope. Every response carries permissive CORS headers; preflight
//! requests get an empty 200.

mod types;

pub use types::{ErrorResponse, RecordsResponse};

use crate::airtable::fetch_records;
use crate::config::ProxyConfig;
use crate::error::{Error, ErrorCategory, Result};
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Handler state shared across requests
///
/// Holds the configuration loaded at startup, or the reason it could not be
/// loaded so each request can report it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<std::result::Result<ProxyConfig, String>>,
}

impl AppState {
    /// State for a valid configuration
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config: Arc::new(Ok(config)),
        }
    }

    /// State from a configuration load attempt
    pub fn from_result(result: Result<ProxyConfig>) -> Self {
        Self {
            config: Arc::new(result.map_err(|e| e.to_string())),
        }
    }

    fn config(&self) -> std::result::Result<&ProxyConfig, &str> {
        match &*self.config {
            Ok(config) => Ok(config),
            Err(reason) => Err(reason.as_str()),
        }
    }
}

/// Error wrapper rendering the failure envelope
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let category = self.0.category();
        let status = StatusCode::from_u16(category.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self.0);
        } else {
            warn!(status = status.as_u16(), "Request failed: {}", self.0);
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Fetch every record for `config` and wrap it in the success envelope
pub async fn run_query(config: &ProxyConfig) -> Result<RecordsResponse> {
    let records = fetch_records(config).await?;
    info!(
        table = %config.query.table_id,
        total = records.len(),
        "Fetched records"
    );
    Ok(RecordsResponse::new(config, records))
}

/// Build the router with CORS and request tracing
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", records_endpoint())
        .route("/records", records_endpoint())
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn records_endpoint() -> MethodRouter<AppState> {
    get(list_records)
        .head(method_not_allowed)
        .options(preflight)
        .fallback(method_not_allowed)
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Main endpoint
async fn list_records(
    State(state): State<AppState>,
) -> std::result::Result<Json<RecordsResponse>, ApiError> {
    let config = state
        .config()
        .map_err(|reason| ApiError(Error::config(reason)))?;

    Ok(Json(run_query(config).await?))
}

/// Non-preflight OPTIONS
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new(
            ErrorCategory::MethodNotAllowed,
            format!("Method {method} is not supported; use GET"),
        )),
    )
}

#[cfg(test)]
mod tests;
