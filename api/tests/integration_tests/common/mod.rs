//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup, a sample OTLP export, a stub logs API, and HTTP
//! request helpers.

use api::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get as get_route;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shared::otlp::ExportLogsServiceRequest;
use shared::source::StaticLogSource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Creates a test router serving a fixed export.
///
/// # Returns
///
/// A tuple containing the configured router and the app state.
pub fn test_app(export: ExportLogsServiceRequest) -> (Router, AppState) {
    let state = AppState::with_static_source(StaticLogSource::new(export));
    let router = create_router(state.clone());
    (router, state)
}

/// An export with four records spread over two resources.
///
/// Newest first, the records are:
/// 1. `1700086400000` ms, `ERROR`, kvlist body (renders empty)
/// 2. `1700003600000` ms, no severity, `false`
/// 3. `1700000060000` ms, `WARN`, `42`
/// 4. `1700000000000` ms, `INFO`, `service started`
pub fn sample_export() -> ExportLogsServiceRequest {
    serde_json::from_value(sample_export_json()).unwrap()
}

/// The raw JSON of [`sample_export`].
pub fn sample_export_json() -> Value {
    json!({
        "resourceLogs": [
            {
                "resource": {
                    "attributes": [{"key": "service.name", "value": {"stringValue": "checkout"}}]
                },
                "scopeLogs": [{
                    "scope": {"name": "checkout.http"},
                    "logRecords": [
                        {
                            "timeUnixNano": "1700000000000000000",
                            "severityText": "INFO",
                            "body": {"stringValue": "service started"}
                        },
                        {
                            "timeUnixNano": "1700000060000000000",
                            "severityNumber": 13,
                            "severityText": "WARN",
                            "body": {"intValue": "42"},
                            "traceId": "5b8efff798038103d269b633813fc60c"
                        },
                        {
                            "timeUnixNano": "1700086400000000000",
                            "severityText": "ERROR",
                            "body": {"kvlistValue": {"values": [
                                {"key": "code", "value": {"intValue": "500"}}
                            ]}}
                        }
                    ]
                }]
            },
            {
                "scopeLogs": [
                    {"scope": {"name": "empty"}},
                    {"logRecords": [
                        {"timeUnixNano": "1700003600000000000", "body": {"boolValue": false}}
                    ]}
                ]
            }
        ]
    })
}

/// Starts a stub logs API serving `payload` at `/logs` with `status`.
///
/// # Returns
///
/// The base URL of the stub and a counter of requests it has received.
pub async fn stub_logs_api(status: StatusCode, payload: Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    let app = Router::new().route(
        "/logs",
        get_route(move || {
            let counter = Arc::clone(&counter);
            let payload = payload.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, axum::Json(payload))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), hits)
}

/// Helper to make a POST request without a body.
///
/// # Returns
///
/// The response status code.
pub async fn post_empty(app: Router, uri: &str) -> StatusCode {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    response.status()
}

/// Helper to make a GET request.
///
/// # Arguments
///
/// * `app` - The Axum router to send the request to
/// * `uri` - The URI path to GET from
///
/// # Returns
///
/// A tuple containing the response status code and parsed JSON response body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}
