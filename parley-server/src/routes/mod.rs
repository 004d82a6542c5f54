//! API route modules.

pub mod admin;
pub mod folders;
pub mod health;
pub mod sessions;

use axum::{
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use parley_core::Error;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .merge(folders::router())
        .merge(sessions::router())
        .merge(admin::router());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state))
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    match state.config.cors_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                warn!(%origin, "invalid PARLEY_CORS_ORIGIN, falling back to permissive CORS");
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    }
}

/// JSON error payload returned by every route
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

/// Map a core error to an HTTP response.
///
/// InvalidArgument -> 400, missing entities -> 404, upstream failures ->
/// 502, everything else -> 500.
pub fn map_error(err: Error) -> ApiError {
    let status = match &err {
        Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        Error::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        _ => {
            error!("internal error: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}
