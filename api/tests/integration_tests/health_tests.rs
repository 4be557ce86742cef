//! Integration tests for health check and general API functionality.
//!
//! Tests cover:
//! - Health check endpoint
//! - Empty export behavior

use axum::http::StatusCode;
use shared::otlp::ExportLogsServiceRequest;

use super::common::{get, test_app};

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = test_app(ExportLogsServiceRequest::default());

    let (status, response) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "loglens-api");
    assert_eq!(response["source"], "in-memory payload");
}

#[tokio::test]
async fn test_empty_export_returns_empty_results() {
    let (app, _state) = test_app(ExportLogsServiceRequest::default());

    let (status, response) = get(app.clone(), "/api/v1/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total_count"], 0);
    assert!(response["logs"].as_array().unwrap().is_empty());

    // Nothing to chart
    let (status, response) = get(app, "/api/v1/logs/histogram").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["interval"], "one_day");
    assert!(response["bins"].as_array().unwrap().is_empty());
}
