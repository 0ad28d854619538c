//! Chat message handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::Pagination;
use crate::api::state::AppState;
use crate::models::message::{ChatMessage, CreateChatMessageRequest};
use crate::utils::errors::CampusError;

/// Either `group_id` (broadcast history) or both `user_id` and `peer_id`
/// (direct conversation) must be present.
#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    pub college_id: Uuid,
    pub group_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub peer_id: Option<Uuid>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MessageListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ChatMessage>>, CampusError> {
    let messages = match (query.group_id, query.user_id, query.peer_id) {
        (Some(group_id), None, None) => {
            state
                .db
                .messages
                .list_group_messages(query.college_id, group_id, page.limit(), page.offset())
                .await?
        }
        (None, Some(user_id), Some(peer_id)) => {
            state
                .db
                .messages
                .list_direct_messages(
                    query.college_id,
                    user_id,
                    peer_id,
                    page.limit(),
                    page.offset(),
                )
                .await?
        }
        _ => {
            return Err(CampusError::Validation(
                "Provide either group_id, or user_id and peer_id".to_string(),
            ))
        }
    };
    Ok(Json(messages))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateChatMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), CampusError> {
    let message = state.db.messages.create(request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
