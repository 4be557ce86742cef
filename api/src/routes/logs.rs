//! Log query endpoints.
//!
//! Serves the normalized log list and the log volume histogram derived from
//! the configured OTLP source.

use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::models::{BucketWidth, HistogramBin, LogView};
use shared::service::ServiceError;
use shared::source::SourceError;
use validator::Validate;

/// Default number of logs returned when no limit is given.
const DEFAULT_LIMIT: usize = 100;

/// Query parameters for listing logs.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LogListParams {
    /// Maximum number of logs to return.
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: Option<usize>,
    /// Number of logs to skip.
    pub offset: Option<usize>,
}

/// Response for a log listing.
#[derive(Debug, Serialize)]
pub struct LogListResponse {
    /// Logs on this page, newest first.
    pub logs: Vec<LogView>,
    /// Total number of logs available.
    pub total_count: usize,
}

/// Query parameters for the histogram.
#[derive(Debug, Default, Deserialize)]
pub struct HistogramParams {
    /// Bucket width; the server default applies when absent.
    pub interval: Option<BucketWidth>,
}

/// Response for the histogram.
#[derive(Debug, Serialize)]
pub struct HistogramResponse {
    /// Bucket width used.
    pub interval: BucketWidth,
    /// Bins in ascending time order.
    pub bins: Vec<HistogramBin>,
}

/// Error response for failed log queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogsError {
    /// Error type.
    pub error: String,
    /// Detailed error message.
    pub message: String,
}

type LogsResult<T> = Result<T, (StatusCode, Json<LogsError>)>;

/// Creates the log query routes.
pub fn logs_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/logs", get(list_logs))
        .route("/api/v1/logs/histogram", get(logs_histogram))
        .route("/api/v1/logs/refresh", post(refresh_logs))
        .with_state(state)
}

/// Handler for listing logs.
///
/// Returns one page of the normalized logs, newest first.
async fn list_logs(
    State(state): State<AppState>,
    params: Result<Query<LogListParams>, QueryRejection>,
) -> LogsResult<Json<LogListResponse>> {
    let Query(params) = params.map_err(|rejection| invalid_query(rejection.body_text()))?;
    params
        .validate()
        .map_err(|e| invalid_query(e.to_string()))?;

    let views = state.logs().views().await.map_err(service_error)?;

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = params.offset.unwrap_or(0);
    let logs: Vec<LogView> = views.iter().skip(offset).take(limit).cloned().collect();

    tracing::debug!(returned = logs.len(), total = views.len(), "Listed logs");

    Ok(Json(LogListResponse {
        logs,
        total_count: views.len(),
    }))
}

/// Handler for the log volume histogram.
///
/// An empty log list yields no bins.
async fn logs_histogram(
    State(state): State<AppState>,
    params: Result<Query<HistogramParams>, QueryRejection>,
) -> LogsResult<Json<HistogramResponse>> {
    let Query(params) = params.map_err(|rejection| invalid_query(rejection.body_text()))?;
    let interval = params.interval.unwrap_or(state.histogram_interval());

    let bins = state
        .logs()
        .histogram(interval)
        .await
        .map_err(service_error)?;

    Ok(Json(HistogramResponse { interval, bins }))
}

/// Handler for dropping the cached logs.
///
/// The next query fetches from the source again.
async fn refresh_logs(State(state): State<AppState>) -> StatusCode {
    state.logs().invalidate();
    StatusCode::NO_CONTENT
}

fn invalid_query(message: String) -> (StatusCode, Json<LogsError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(LogsError {
            error: "invalid_query".to_string(),
            message,
        }),
    )
}

fn service_error(err: ServiceError) -> (StatusCode, Json<LogsError>) {
    tracing::error!(error = %err, "Failed to load logs");

    let (status, error) = match &err {
        ServiceError::Source(SourceError::Decode(_)) | ServiceError::Ingest(_) => {
            (StatusCode::BAD_GATEWAY, "invalid_payload")
        }
        ServiceError::Source(_) => (StatusCode::BAD_GATEWAY, "upstream_unavailable"),
        ServiceError::Histogram(_) => (StatusCode::UNPROCESSABLE_ENTITY, "too_many_bins"),
    };

    (
        status,
        Json(LogsError {
            error: error.to_string(),
            message: err.to_string(),
        }),
    )
}
