//! Session lifecycle, listing and turn-submission routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use parley_core::types::{ChatMessage, GroupedSessions};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::routes::{map_error, ApiError};
use crate::state::AppState;

/// Create session router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", get(list_sessions).post(new_session))
        .route("/sessions/all", get(all_sessions))
        .route("/sessions/delete", post(delete_sessions))
        .route("/sessions/{id}", get(load_session))
        .route("/sessions/{id}/name", put(rename_session))
        .route("/sessions/{id}/move", post(move_session))
        .route("/sessions/{id}/end", post(end_session))
        .route("/sessions/{id}/messages", post(submit_turn))
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub name: Option<String>,
    pub folder_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    pub folder_id: Option<String>,
}

/// List valid sessions; no `folder_id` means unfoldered sessions
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let sessions = state
        .db
        .list_sessions(query.folder_id.as_deref())
        .map_err(map_error)?;

    let sessions = sessions
        .into_iter()
        .map(|s| SessionResponse {
            id: s.id,
            name: s.name,
            folder_id: s.folder_id,
        })
        .collect();

    Ok(Json(sessions))
}

/// Full tree view: folders with their valid sessions plus unfoldered ones
pub async fn all_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GroupedSessions>, ApiError> {
    let grouped = state.db.list_all_grouped().map_err(map_error)?;
    Ok(Json(grouped))
}

#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    #[serde(default)]
    pub folder_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

/// Create a new session, optionally inside a folder
pub async fn new_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<(StatusCode, Json<NewSessionResponse>), ApiError> {
    let session = state
        .chat
        .new_session(req.folder_id.as_deref())
        .map_err(map_error)?;

    Ok((
        StatusCode::CREATED,
        Json(NewSessionResponse {
            session_id: session.id,
        }),
    ))
}

/// Load a session's transcript in insertion order
pub async fn load_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let transcript = state.chat.load_session(&id).map_err(map_error)?;
    let transcript = transcript.iter().map(ChatMessage::from).collect();
    Ok(Json(transcript))
}

#[derive(Debug, Deserialize)]
pub struct RenameSessionRequest {
    pub name: String,
}

/// Update a session's display name
pub async fn rename_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<RenameSessionRequest>,
) -> Result<StatusCode, ApiError> {
    state.chat.rename_session(&id, &req.name).map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
pub struct MoveSessionRequest {
    #[serde(default)]
    pub folder_id: Option<String>,
}

/// Move a session to a folder, or to unfoldered when `folder_id` is absent
pub async fn move_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveSessionRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .db
        .move_session(&id, req.folder_id.as_deref())
        .map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// End a session; a no-op when the id no longer exists
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.chat.end_session(&id).map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct DeleteSessionsRequest {
    pub ids: Vec<String>,
}

/// Delete a batch of sessions and their ledgers
pub async fn delete_sessions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteSessionsRequest>,
) -> Result<StatusCode, ApiError> {
    state.chat.delete_sessions(&req.ids).map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub response: String,
}

/// Submit a user turn and return the assistant reply
pub async fn submit_turn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    let response = state
        .chat
        .submit_turn(&id, &req.message)
        .await
        .map_err(map_error)?;

    Ok(Json(TurnResponse { response }))
}
