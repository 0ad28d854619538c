//! User handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::{ActorEmail, Pagination};
use crate::api::state::AppState;
use crate::models::user::{
    CefrLevel, CreateUserRequest, UpdateUserRequest, User, UserRole,
};
use crate::utils::errors::CampusError;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub college_id: Uuid,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
pub struct AssignCefrRequest {
    pub cefr_level: CefrLevel,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<User>>, CampusError> {
    let users = state
        .db
        .users
        .list_by_college(query.college_id, query.role, page.limit(), page.offset())
        .await?;
    Ok(Json(users))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), CampusError> {
    let user = state.db.register_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, CampusError> {
    let user = state
        .db
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("user", id))?;
    Ok(Json(user))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, CampusError> {
    let user = state.db.users.update(id, request).await?;
    Ok(Json(user))
}

pub async fn assign_cefr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActorEmail(actor): ActorEmail,
    Json(request): Json<AssignCefrRequest>,
) -> Result<Json<User>, CampusError> {
    let user = state.db.assign_cefr(&actor, id, request.cefr_level).await?;
    Ok(Json(user))
}

pub async fn change_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActorEmail(actor): ActorEmail,
    Json(request): Json<ChangeRoleRequest>,
) -> Result<Json<User>, CampusError> {
    let user = state.db.change_role(&actor, id, request.role).await?;
    Ok(Json(user))
}
