//! Tests for the inbound handler

use super::*;
use crate::config::QueryConfig;
use crate::types::SortDirection;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method as http_method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_PATH: &str = "/v0/appX/tblTasks";

fn config_for(server: &MockServer) -> ProxyConfig {
    ProxyConfig::new("key", "appX")
        .with_api_url(format!("{}/v0", server.uri()))
        .with_query(
            QueryConfig::new("tblTasks")
                .filter("{Done} = 0")
                .sort("Due", SortDirection::Asc),
        )
}

async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, "https://site.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_get_returns_envelope() {
    let server = MockServer::start().await;

    Mock::given(http_method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("offset", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": "r2", "fields": {"Name": "B"}}]
        })))
        .mount(&server)
        .await;

    Mock::given(http_method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": "r1", "fields": {"Name": "A"}}],
            "offset": "p2"
        })))
        .mount(&server)
        .await;

    let app = router(AppState::new(config_for(&server)));
    let (status, headers, body) = call(app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(
        json_body(&body),
        json!({
            "success": true,
            "records": [
                {"id": "r1", "fields": {"Name": "A"}},
                {"id": "r2", "fields": {"Name": "B"}}
            ],
            "totalRecords": 2,
            "table": "tblTasks",
            "filter": "{Done} = 0",
            "sort": {"field": "Due", "direction": "asc"}
        })
    );
}

#[tokio::test]
async fn test_unauthorized_upstream() {
    let server = MockServer::start().await;

    Mock::given(http_method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let app = router(AppState::new(config_for(&server)));
    let (status, _, body) = call(app, Method::GET, "/records").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body = json_body(&body);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Authentication error");
    assert_eq!(body["message"], "Airtable API error: 401 - Unauthorized");
}

#[tokio::test]
async fn test_rate_limited_on_second_page() {
    let server = MockServer::start().await;

    Mock::given(http_method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("offset", "tokA"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    Mock::given(http_method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": "r1"}],
            "offset": "tokA"
        })))
        .mount(&server)
        .await;

    let app = router(AppState::new(config_for(&server)));
    let (status, _, body) = call(app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    let body = json_body(&body);
    assert_eq!(body["error"], "Rate limit exceeded");
    assert!(body.get("records").is_none());
}

#[tokio::test]
async fn test_missing_configuration() {
    let state = AppState::from_result(Err(Error::missing_field("AIRTABLE_API_KEY")));
    let app = router(state);

    let (status, _, body) = call(app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(&body);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Server configuration error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("AIRTABLE_API_KEY"));
}

#[tokio::test]
async fn test_post_rejected() {
    let app = router(AppState::new(ProxyConfig::new("key", "app")));

    let (status, headers, body) = call(app, Method::POST, "/").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let body = json_body(&body);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_head_rejected() {
    let server = MockServer::start().await;

    Mock::given(http_method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"records": []})))
        .expect(0)
        .mount(&server)
        .await;

    let app = router(AppState::new(config_for(&server)));
    let (status, headers, _) = call(app, Method::HEAD, "/").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = router(AppState::new(ProxyConfig::new("key", "app")));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header(header::ORIGIN, "https://site.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_plain_options_is_empty_ok() {
    let app = router(AppState::new(ProxyConfig::new("key", "app")));

    let (status, _, body) = call(app, Method::OPTIONS, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_health() {
    let app = router(AppState::from_result(Err(Error::config("unset"))));

    let (status, _, body) = call(app, Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"status": "ok"}));
}

#[test]
fn test_records_response_counts() {
    let config = ProxyConfig::new("k", "app");
    let response = RecordsResponse::new(
        &config,
        vec![crate::types::Record::new("a"), crate::types::Record::new("b")],
    );

    assert_eq!(response.total_records, 2);
    assert_eq!(response.table, "Table 1");
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["filter"], Value::Null);
    assert_eq!(value["sort"], Value::Null);
}
