//! Study group handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::extract::{Pagination, TenantQuery};
use crate::api::state::AppState;
use crate::models::group::{
    CreateStudyGroupRequest, GroupMembership, JoinGroupRequest, StudyGroup,
    UpdateStudyGroupRequest,
};
use crate::utils::errors::CampusError;

pub async fn list(
    State(state): State<AppState>,
    Query(tenant): Query<TenantQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<StudyGroup>>, CampusError> {
    let groups = state
        .db
        .groups
        .list_by_college(tenant.college_id, page.limit(), page.offset())
        .await?;
    Ok(Json(groups))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateStudyGroupRequest>,
) -> Result<(StatusCode, Json<StudyGroup>), CampusError> {
    let group = state.db.groups.create(request).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudyGroup>, CampusError> {
    let group = state
        .db
        .groups
        .find_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("study group", id))?;
    Ok(Json(group))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStudyGroupRequest>,
) -> Result<Json<StudyGroup>, CampusError> {
    let group = state.db.groups.update(id, request).await?;
    Ok(Json(group))
}

pub async fn join(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JoinGroupRequest>,
) -> Result<(StatusCode, Json<GroupMembership>), CampusError> {
    let membership = state.db.groups.join(id, request.user_id).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

pub async fn members(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GroupMembership>>, CampusError> {
    let members = state.db.groups.get_members(id).await?;
    Ok(Json(members))
}
