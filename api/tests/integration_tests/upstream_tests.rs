//! Integration tests against a live logs API.
//!
//! Tests cover:
//! - One fetch shared by concurrent requests
//! - Refresh triggering a new fetch
//! - Upstream failures

use axum::http::StatusCode;
use serde_json::json;
use shared::models::BucketWidth;
use shared::source::HttpLogSource;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use super::common::{get, post_empty, sample_export_json, stub_logs_api};

fn app_for(base_url: &str) -> axum::Router {
    let source = HttpLogSource::new(base_url, Duration::from_secs(5)).unwrap();
    api::create_router(api::AppState::new(Arc::new(source), BucketWidth::OneDay))
}

#[tokio::test]
async fn test_table_and_histogram_share_one_fetch() {
    let (base_url, hits) = stub_logs_api(StatusCode::OK, sample_export_json()).await;
    let app = app_for(&base_url);

    let (logs, histogram, again) = tokio::join!(
        get(app.clone(), "/api/v1/logs"),
        get(app.clone(), "/api/v1/logs/histogram"),
        get(app.clone(), "/api/v1/logs?limit=1"),
    );

    assert_eq!(logs.0, StatusCode::OK);
    assert_eq!(logs.1["total_count"], 4);
    assert_eq!(histogram.0, StatusCode::OK);
    assert_eq!(histogram.1["bins"].as_array().unwrap().len(), 2);
    assert_eq!(again.1["logs"].as_array().unwrap().len(), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_refresh_refetches() {
    let (base_url, hits) = stub_logs_api(StatusCode::OK, sample_export_json()).await;
    let app = app_for(&base_url);

    get(app.clone(), "/api/v1/logs").await;
    get(app.clone(), "/api/v1/logs").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let status = post_empty(app.clone(), "/api/v1/logs/refresh").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, response) = get(app, "/api/v1/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total_count"], 4);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_upstream_error_status() {
    let (base_url, hits) =
        stub_logs_api(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "down"})).await;
    let app = app_for(&base_url);

    let (status, response) = get(app.clone(), "/api/v1/logs").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["error"], "upstream_unavailable");
    assert!(response["message"].as_str().unwrap().contains("500"));

    // Failures are not cached
    get(app, "/api/v1/logs").await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_upstream_unreachable() {
    // Nothing listens on the discard port
    let app = app_for("http://127.0.0.1:9");

    let (status, response) = get(app, "/api/v1/logs/histogram").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["error"], "upstream_unavailable");
}

#[tokio::test]
async fn test_upstream_malformed_payload() {
    let (base_url, _hits) = stub_logs_api(StatusCode::OK, json!({"resourceLogs": 7})).await;
    let app = app_for(&base_url);

    let (status, response) = get(app, "/api/v1/logs").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["error"], "invalid_payload");
}
