//! Identity lookup handler
//!
//! The external identity provider authenticates users and hands the core an
//! email; this endpoint maps that email to the user's (role, college) pair.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::models::user::UserRole;
use crate::utils::errors::CampusError;

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub role: UserRole,
    pub college_id: Uuid,
}

pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<IdentityResponse>, CampusError> {
    let (role, college_id) = state.db.resolve_identity(&query.email).await?;
    Ok(Json(IdentityResponse { role, college_id }))
}
