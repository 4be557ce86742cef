//! Integration tests for the log volume histogram.
//!
//! Tests cover:
//! - Default day-wide buckets
//! - Interval override
//! - Invalid intervals

use axum::http::StatusCode;
use serde_json::Value;
use shared::models::BucketWidth;
use shared::source::StaticLogSource;
use std::sync::Arc;

use super::common::{get, sample_export, test_app};

fn counts(response: &Value) -> Vec<u64> {
    response["bins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["count"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_histogram_default_interval() {
    let (app, _state) = test_app(sample_export());

    let (status, response) = get(app, "/api/v1/logs/histogram").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["interval"], "one_day");

    // Earliest and latest entries are exactly one day apart
    assert_eq!(counts(&response), vec![3, 1]);
    assert_eq!(response["bins"][0]["bucket_start"], "2023-11-14T22:13:20Z");
    assert_eq!(response["bins"][1]["bucket_start"], "2023-11-15T22:13:20Z");
}

#[tokio::test]
async fn test_histogram_interval_override() {
    let (app, _state) = test_app(sample_export());

    let (status, response) = get(app, "/api/v1/logs/histogram?interval=one_hour").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["interval"], "one_hour");

    let counts = counts(&response);
    assert_eq!(counts.len(), 25);
    assert_eq!(counts[0], 2);
    assert_eq!(counts[1], 1);
    assert_eq!(counts[24], 1);
    assert_eq!(counts.iter().sum::<u64>(), 4);
}

#[tokio::test]
async fn test_histogram_interval_short_name() {
    let (app, _state) = test_app(sample_export());

    let (status, response) = get(app, "/api/v1/logs/histogram?interval=1h").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["interval"], "one_hour");
    assert_eq!(response["bins"].as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn test_histogram_uses_configured_interval() {
    let state = api::AppState::new(
        Arc::new(StaticLogSource::new(sample_export())),
        BucketWidth::OneHour,
    );
    let app = api::create_router(state);

    let (status, response) = get(app, "/api/v1/logs/histogram").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["interval"], "one_hour");
    assert_eq!(response["bins"].as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn test_histogram_too_many_bins() {
    let export = serde_json::from_value(serde_json::json!({
        "resourceLogs": [{"scopeLogs": [{"logRecords": [
            {"timeUnixNano": "0"},
            {"timeUnixNano": "1700000000000000000"}
        ]}]}]
    }))
    .unwrap();
    let (app, _state) = test_app(export);

    let (status, response) = get(app, "/api/v1/logs/histogram?interval=one_minute").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "too_many_bins");
}

#[tokio::test]
async fn test_histogram_rejects_unknown_interval() {
    let (app, _state) = test_app(sample_export());

    let (status, response) = get(app, "/api/v1/logs/histogram?interval=weekly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "invalid_query");
}
