//! Folder management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::routes::{map_error, ApiError};
use crate::state::AppState;

/// Create folder router
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/folders", get(list_folders).post(create_folder))
        .route("/folders/{id}", put(rename_folder).delete(delete_folder))
        .route("/folders/{id}/contents", delete(delete_folder_with_contents))
}

#[derive(Debug, Serialize)]
pub struct FolderResponse {
    pub id: String,
    pub name: String,
}

/// List folders
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = state.db.list_folders().map_err(map_error)?;

    let folders = folders
        .into_iter()
        .map(|f| FolderResponse {
            id: f.id,
            name: f.name,
        })
        .collect();

    Ok(Json(folders))
}

#[derive(Debug, Deserialize)]
pub struct FolderNameRequest {
    pub name: String,
}

/// Create a new folder
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FolderNameRequest>,
) -> Result<(StatusCode, Json<FolderResponse>), ApiError> {
    let folder = state.db.create_folder(&req.name).map_err(map_error)?;

    Ok((
        StatusCode::CREATED,
        Json(FolderResponse {
            id: folder.id,
            name: folder.name,
        }),
    ))
}

/// Rename a folder
pub async fn rename_folder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<FolderNameRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = state.db.rename_folder(&id, &req.name).map_err(map_error)?;

    Ok(Json(FolderResponse {
        id: folder.id,
        name: folder.name,
    }))
}

/// Delete a folder, orphaning its sessions
pub async fn delete_folder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_folder(&id).map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a folder together with its sessions and their ledgers
pub async fn delete_folder_with_contents(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_folder_with_contents(&id).map_err(map_error)?;
    Ok(StatusCode::NO_CONTENT)
}
