//! Shared file handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::{ActorEmail, Pagination};
use crate::api::state::AppState;
use crate::models::file::{CreateSharedFileRequest, SharedFile};
use crate::utils::errors::CampusError;

#[derive(Debug, Deserialize)]
pub struct FileListQuery {
    pub college_id: Uuid,
    pub uploader_id: Option<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FileListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<SharedFile>>, CampusError> {
    let files = state
        .db
        .files
        .list_by_college(
            query.college_id,
            query.uploader_id,
            page.limit(),
            page.offset(),
        )
        .await?;
    Ok(Json(files))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateSharedFileRequest>,
) -> Result<(StatusCode, Json<SharedFile>), CampusError> {
    let file = state.db.files.create(request).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// Run the expiry sweep over temporary files and ephemeral messages
pub async fn purge_expired(
    State(state): State<AppState>,
    ActorEmail(actor): ActorEmail,
) -> Result<Json<serde_json::Value>, CampusError> {
    let result = state.db.purge_expired(&actor).await?;
    Ok(Json(result))
}
