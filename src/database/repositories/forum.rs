//! Forum repository implementation
//!
//! Denormalized counters (`likes_count`, `replies_count`, `views_count`)
//! are maintained with single atomic increments, co-located with the row
//! they track. Locked posts reject new replies.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::forum::{
    CreateForumPostRequest, CreateForumReplyRequest, ForumPost, ForumReply,
    ModerateForumPostRequest,
};
use crate::utils::errors::CampusError;

const POST_COLUMNS: &str = "id, college_id, author_id, group_id, category, title, content, \
     likes_count, replies_count, views_count, is_sticky, is_locked, is_pinned, \
     created_at, updated_at";

const REPLY_COLUMNS: &str = "id, post_id, author_id, content, likes_count, created_at";

#[derive(Debug, Clone)]
pub struct ForumRepository {
    pool: PgPool,
}

impl ForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new forum post
    pub async fn create_post(&self, request: CreateForumPostRequest) -> Result<ForumPost, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let post = sqlx::query_as::<_, ForumPost>(&format!(
            r#"
            INSERT INTO forum_posts (id, college_id, author_id, group_id, category,
                                     title, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.author_id)
        .bind(request.group_id)
        .bind(request.category)
        .bind(request.title)
        .bind(request.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Fetch a post and bump its view counter in one atomic statement
    pub async fn view_post(&self, id: Uuid) -> Result<ForumPost, CampusError> {
        let post = sqlx::query_as::<_, ForumPost>(&format!(
            "UPDATE forum_posts SET views_count = views_count + 1 WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("forum post", id))?;

        Ok(post)
    }

    /// Find post by ID without touching the view counter
    pub async fn find_post_by_id(&self, id: Uuid) -> Result<Option<ForumPost>, CampusError> {
        let post = sqlx::query_as::<_, ForumPost>(&format!(
            "SELECT {POST_COLUMNS} FROM forum_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// List posts for a college, optionally filtered by category. Sticky
    /// posts float to the top.
    pub async fn list_posts_by_college(
        &self,
        college_id: Uuid,
        category: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ForumPost>, CampusError> {
        let posts = sqlx::query_as::<_, ForumPost>(&format!(
            r#"
            SELECT {POST_COLUMNS} FROM forum_posts
            WHERE college_id = $1 AND ($2::varchar IS NULL OR category = $2)
            ORDER BY is_sticky DESC, created_at ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(college_id)
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Add a reply. One transaction: lock the post, reject if locked, insert
    /// the reply and bump `replies_count` together.
    pub async fn create_reply(
        &self,
        post_id: Uuid,
        request: CreateForumReplyRequest,
    ) -> Result<ForumReply, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let (is_locked,): (bool,) =
            sqlx::query_as("SELECT is_locked FROM forum_posts WHERE id = $1 FOR UPDATE")
                .bind(post_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CampusError::not_found("forum post", post_id))?;

        if is_locked {
            return Err(CampusError::Conflict(
                "Post is locked and does not accept replies".to_string(),
            ));
        }

        let reply = sqlx::query_as::<_, ForumReply>(&format!(
            r#"
            INSERT INTO forum_replies (id, post_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REPLY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(request.author_id)
        .bind(request.content)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE forum_posts SET replies_count = replies_count + 1, updated_at = $2 WHERE id = $1")
            .bind(post_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(reply)
    }

    /// List replies for a post in insertion order
    pub async fn list_replies(&self, post_id: Uuid) -> Result<Vec<ForumReply>, CampusError> {
        let replies = sqlx::query_as::<_, ForumReply>(&format!(
            "SELECT {REPLY_COLUMNS} FROM forum_replies WHERE post_id = $1 ORDER BY created_at ASC"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(replies)
    }

    /// Like a post with a single atomic increment
    pub async fn like_post(&self, id: Uuid) -> Result<ForumPost, CampusError> {
        let post = sqlx::query_as::<_, ForumPost>(&format!(
            "UPDATE forum_posts SET likes_count = likes_count + 1 WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("forum post", id))?;

        Ok(post)
    }

    /// Apply moderation flags to a post
    pub async fn moderate_post(
        &self,
        id: Uuid,
        request: ModerateForumPostRequest,
    ) -> Result<ForumPost, CampusError> {
        let post = sqlx::query_as::<_, ForumPost>(&format!(
            r#"
            UPDATE forum_posts
            SET is_sticky = COALESCE($2, is_sticky),
                is_locked = COALESCE($3, is_locked),
                is_pinned = COALESCE($4, is_pinned),
                updated_at = $5
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.is_sticky)
        .bind(request.is_locked)
        .bind(request.is_pinned)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("forum post", id))?;

        Ok(post)
    }
}
