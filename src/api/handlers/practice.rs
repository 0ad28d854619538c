//! Practice module and progress handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::Pagination;
use crate::api::state::AppState;
use crate::models::practice::{
    CreatePracticeModuleRequest, ModuleType, PracticeModule, RecordProgressRequest, UserProgress,
};
use crate::utils::errors::CampusError;

#[derive(Debug, Deserialize)]
pub struct ModuleListQuery {
    pub college_id: Uuid,
    pub module_type: Option<ModuleType>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub user_id: Uuid,
}

pub async fn list_modules(
    State(state): State<AppState>,
    Query(query): Query<ModuleListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<PracticeModule>>, CampusError> {
    let modules = state
        .db
        .practice
        .list_modules_by_college(
            query.college_id,
            query.module_type,
            page.limit(),
            page.offset(),
        )
        .await?;
    Ok(Json(modules))
}

pub async fn create_module(
    State(state): State<AppState>,
    Json(request): Json<CreatePracticeModuleRequest>,
) -> Result<(StatusCode, Json<PracticeModule>), CampusError> {
    let module = state.db.practice.create_module(request).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

pub async fn record_progress(
    State(state): State<AppState>,
    Json(request): Json<RecordProgressRequest>,
) -> Result<Json<UserProgress>, CampusError> {
    let progress = state.db.practice.record_progress(request).await?;
    Ok(Json(progress))
}

pub async fn list_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<Vec<UserProgress>>, CampusError> {
    let rows = state.db.practice.list_user_progress(query.user_id).await?;
    Ok(Json(rows))
}
