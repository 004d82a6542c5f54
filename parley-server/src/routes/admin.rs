//! Administrative routes.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use std::sync::Arc;

use crate::routes::{map_error, ApiError};
use crate::state::AppState;

/// Create admin router
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/admin/reset", post(reset))
}

/// Irreversibly wipe every folder, session and message.
///
/// Access gating is the deployment's responsibility; the core applies none.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.chat.reset().map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}
