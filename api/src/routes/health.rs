//! Health check endpoint.
//!
//! Reports liveness for load balancers along with the configured log source.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Where logs are fetched from.
    pub source: String,
}

/// Creates the health check routes.
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check handler.
///
/// Does not contact the log source; an unreachable upstream shows up on the
/// log endpoints instead.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "loglens-api",
        version: env!("CARGO_PKG_VERSION"),
        source: state.logs().source_description(),
    })
}
