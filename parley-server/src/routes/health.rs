//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: bool,
    pub upstream: String,
}

/// Health check endpoint.
///
/// Reports own status plus upstream reachability. A failing probe means
/// `"unhealthy"`; it never surfaces as an error response.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let db_healthy = state.db.ping().is_ok();
    let upstream_healthy = state.completion.probe().await.is_ok();

    let status = if db_healthy { "healthy" } else { "degraded" };
    let upstream = if upstream_healthy {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database: db_healthy,
        upstream: upstream.to_string(),
    })
}
