//! Integration tests for listing normalized logs.
//!
//! Tests cover:
//! - Flattening across resources and scopes
//! - Newest-first ordering
//! - Body and severity rendering
//! - Raw record pass-through
//! - Pagination and limit validation

use axum::http::StatusCode;

use super::common::{get, sample_export, sample_export_json, test_app};

#[tokio::test]
async fn test_list_logs_newest_first() {
    let (app, _state) = test_app(sample_export());

    let (status, response) = get(app, "/api/v1/logs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total_count"], 4);

    let logs = response["logs"].as_array().unwrap();
    let bodies: Vec<&str> = logs.iter().map(|l| l["body"].as_str().unwrap()).collect();
    assert_eq!(bodies, vec!["", "false", "42", "service started"]);

    assert_eq!(logs[0]["severity"], "ERROR");
    assert!(logs[1].get("severity").is_none());
    assert_eq!(logs[2]["severity"], "WARN");
    assert_eq!(logs[3]["severity"], "INFO");
    assert_eq!(logs[3]["time"], "2023-11-14T22:13:20Z");
}

#[tokio::test]
async fn test_list_logs_keeps_raw_record() {
    let (app, _state) = test_app(sample_export());

    let (_, response) = get(app, "/api/v1/logs").await;
    let logs = response["logs"].as_array().unwrap();

    let source = &sample_export_json()["resourceLogs"][0]["scopeLogs"][0]["logRecords"][1];
    assert_eq!(&logs[2]["raw"], source);
    assert_eq!(logs[2]["raw"]["traceId"], "5b8efff798038103d269b633813fc60c");
}

#[tokio::test]
async fn test_list_logs_pagination() {
    let (app, _state) = test_app(sample_export());

    let (status, response) = get(app.clone(), "/api/v1/logs?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total_count"], 4);
    assert_eq!(response["logs"].as_array().unwrap().len(), 2);
    assert_eq!(response["logs"][0]["severity"], "ERROR");

    let (status, response) = get(app.clone(), "/api/v1/logs?limit=2&offset=2").await;
    assert_eq!(status, StatusCode::OK);
    let logs = response["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["body"], "42");
    assert_eq!(logs[1]["body"], "service started");

    let (status, response) = get(app, "/api/v1/logs?offset=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total_count"], 4);
    assert!(response["logs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_logs_rejects_bad_limit() {
    let (app, _state) = test_app(sample_export());

    let (status, response) = get(app.clone(), "/api/v1/logs?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "invalid_query");

    let (status, _) = get(app.clone(), "/api/v1/logs?limit=1001").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, response) = get(app, "/api/v1/logs?limit=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "invalid_query");
}

#[tokio::test]
async fn test_list_logs_invalid_timestamp() {
    let export = serde_json::from_value(serde_json::json!({
        "resourceLogs": [{"scopeLogs": [{"logRecords": [
            {"timeUnixNano": "1700000000000000000"},
            {"timeUnixNano": "yesterday"}
        ]}]}]
    }))
    .unwrap();
    let (app, _state) = test_app(export);

    let (status, response) = get(app, "/api/v1/logs").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(response["error"], "invalid_payload");
    assert!(response["message"].as_str().unwrap().contains("yesterday"));
}
