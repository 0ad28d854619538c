//! Admin and moderation handlers
//!
//! Every route here requires an acting identity and performs an explicit
//! role check in the service layer.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::api::extract::{ActorEmail, Pagination, TenantQuery};
use crate::api::state::AppState;
use crate::models::audit::{AdminLog, RecruiterAction};
use crate::models::forum::{ForumPost, ModerateForumPostRequest};
use crate::utils::errors::CampusError;

pub async fn moderate_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActorEmail(actor): ActorEmail,
    Json(request): Json<ModerateForumPostRequest>,
) -> Result<Json<ForumPost>, CampusError> {
    let post = state.db.moderate_post(&actor, id, request).await?;
    Ok(Json(post))
}

pub async fn list_logs(
    State(state): State<AppState>,
    ActorEmail(actor): ActorEmail,
    Query(tenant): Query<TenantQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<AdminLog>>, CampusError> {
    let logs = state
        .db
        .list_admin_logs(&actor, tenant.college_id, page.limit(), page.offset())
        .await?;
    Ok(Json(logs))
}

pub async fn list_recruiter_actions(
    State(state): State<AppState>,
    ActorEmail(actor): ActorEmail,
    Query(tenant): Query<TenantQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<RecruiterAction>>, CampusError> {
    let actions = state
        .db
        .list_recruiter_actions(&actor, tenant.college_id, page.limit(), page.offset())
        .await?;
    Ok(Json(actions))
}
