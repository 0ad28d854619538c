//! Forum post and reply models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ForumPost {
    pub id: Uuid,
    pub college_id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub category: Option<String>,
    pub title: String,
    pub content: String,
    pub likes_count: i32,
    pub replies_count: i32,
    pub views_count: i32,
    pub is_sticky: bool,
    pub is_locked: bool,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ForumReply {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateForumPostRequest {
    pub college_id: Uuid,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub category: Option<String>,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateForumReplyRequest {
    pub author_id: Uuid,
    pub content: String,
}

/// Moderation flags, settable only through the admin moderation endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModerateForumPostRequest {
    pub is_sticky: Option<bool>,
    pub is_locked: Option<bool>,
    pub is_pinned: Option<bool>,
}

impl CreateForumPostRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CampusError::Validation(
                "Post title is required".to_string(),
            ));
        }
        if self.content.trim().is_empty() {
            return Err(CampusError::Validation(
                "Post content is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl CreateForumReplyRequest {
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(CampusError::Validation(
                "Reply content is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_requires_title_and_content() {
        let request = CreateForumPostRequest {
            college_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            group_id: None,
            category: Some("grammar".to_string()),
            title: String::new(),
            content: "How do articles work?".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
