//! Forum handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::Pagination;
use crate::api::state::AppState;
use crate::models::forum::{
    CreateForumPostRequest, CreateForumReplyRequest, ForumPost, ForumReply,
};
use crate::utils::errors::CampusError;

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub college_id: Uuid,
    pub category: Option<String>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ForumPost>>, CampusError> {
    let posts = state
        .db
        .forum
        .list_posts_by_college(query.college_id, query.category, page.limit(), page.offset())
        .await?;
    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreateForumPostRequest>,
) -> Result<(StatusCode, Json<ForumPost>), CampusError> {
    let post = state.db.forum.create_post(request).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Reading a post counts as a view.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ForumPost>, CampusError> {
    let post = state.db.forum.view_post(id).await?;
    Ok(Json(post))
}

pub async fn create_reply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateForumReplyRequest>,
) -> Result<(StatusCode, Json<ForumReply>), CampusError> {
    let reply = state.db.forum.create_reply(id, request).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}

pub async fn list_replies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ForumReply>>, CampusError> {
    let replies = state.db.forum.list_replies(id).await?;
    Ok(Json(replies))
}

pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ForumPost>, CampusError> {
    let post = state.db.forum.like_post(id).await?;
    Ok(Json(post))
}
