//! College handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::extract::Pagination;
use crate::api::state::AppState;
use crate::models::college::{College, CreateCollegeRequest, UpdateCollegeRequest};
use crate::utils::errors::CampusError;

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<College>>, CampusError> {
    let colleges = state.db.colleges.list(page.limit(), page.offset()).await?;
    Ok(Json(colleges))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCollegeRequest>,
) -> Result<(StatusCode, Json<College>), CampusError> {
    let college = state.db.colleges.create(request).await?;
    Ok((StatusCode::CREATED, Json(college)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<College>, CampusError> {
    let college = state
        .db
        .colleges
        .find_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("college", id))?;
    Ok(Json(college))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCollegeRequest>,
) -> Result<Json<College>, CampusError> {
    let college = state.db.colleges.update(id, request).await?;
    Ok(Json(college))
}
