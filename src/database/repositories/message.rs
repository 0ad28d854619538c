//! Chat message repository implementation
//!
//! Messages never block on the external grammar service: whatever corrected
//! text and suggestions the caller already has are stored as-is, defaulting
//! to the original text with an empty suggestion list.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::message::{ChatMessage, CreateChatMessageRequest};
use crate::utils::errors::CampusError;

const MESSAGE_COLUMNS: &str = "id, college_id, sender_id, receiver_id, group_id, original_text, \
     corrected_text, suggestions, expires_at, created_at";

#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a message, direct or group. Sender, receiver, and group must
    /// all belong to the message's college.
    pub async fn create(&self, request: CreateChatMessageRequest) -> Result<ChatMessage, CampusError> {
        request.validate()?;

        self.check_same_college(&request).await?;

        let message = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            INSERT INTO chat_messages (id, college_id, sender_id, receiver_id, group_id,
                                       original_text, corrected_text, suggestions,
                                       expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.sender_id)
        .bind(request.receiver_id)
        .bind(request.group_id)
        .bind(request.original_text)
        .bind(request.corrected_text)
        .bind(request.suggestions.unwrap_or_else(|| serde_json::json!([])))
        .bind(request.expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn check_same_college(&self, request: &CreateChatMessageRequest) -> Result<(), CampusError> {
        let (sender_college,): (Uuid,) =
            sqlx::query_as("SELECT college_id FROM users WHERE id = $1")
                .bind(request.sender_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| CampusError::not_found("user", request.sender_id))?;
        if sender_college != request.college_id {
            return Err(CampusError::Validation(
                "Sender belongs to a different college".to_string(),
            ));
        }

        if let Some(receiver_id) = request.receiver_id {
            let (receiver_college,): (Uuid,) =
                sqlx::query_as("SELECT college_id FROM users WHERE id = $1")
                    .bind(receiver_id)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or_else(|| CampusError::not_found("user", receiver_id))?;
            if receiver_college != request.college_id {
                return Err(CampusError::Validation(
                    "Receiver belongs to a different college".to_string(),
                ));
            }
        }

        if let Some(group_id) = request.group_id {
            let (group_college,): (Uuid,) =
                sqlx::query_as("SELECT college_id FROM study_groups WHERE id = $1")
                    .bind(group_id)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or_else(|| CampusError::not_found("study group", group_id))?;
            if group_college != request.college_id {
                return Err(CampusError::Validation(
                    "Group belongs to a different college".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// List broadcast messages for a group within a college
    pub async fn list_group_messages(
        &self,
        college_id: Uuid,
        group_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatMessage>, CampusError> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM chat_messages
            WHERE college_id = $1 AND group_id = $2
            ORDER BY created_at ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(college_id)
        .bind(group_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// List the direct conversation between two users, both directions
    pub async fn list_direct_messages(
        &self,
        college_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatMessage>, CampusError> {
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM chat_messages
            WHERE college_id = $1
              AND ((sender_id = $2 AND receiver_id = $3) OR (sender_id = $3 AND receiver_id = $2))
            ORDER BY created_at ASC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(college_id)
        .bind(user_a)
        .bind(user_b)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Remove ephemeral messages whose expiry has passed. Returns the number
    /// of rows deleted.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CampusError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE expires_at IS NOT NULL AND expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
