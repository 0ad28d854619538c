//! Chat message model
//!
//! A message is either direct (receiver set) or broadcast (group set),
//! exactly one of the two. Grammar corrections come from an external
//! service; when it is unavailable the original text is stored with an
//! empty suggestion list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub college_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub original_text: String,
    pub corrected_text: Option<String>,
    pub suggestions: serde_json::Value,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatMessageRequest {
    pub college_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub original_text: String,
    pub corrected_text: Option<String>,
    pub suggestions: Option<serde_json::Value>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateChatMessageRequest {
    pub fn validate(&self) -> Result<()> {
        match (self.receiver_id, self.group_id) {
            (Some(_), Some(_)) => Err(CampusError::Validation(
                "Message cannot target both a receiver and a group".to_string(),
            )),
            (None, None) => Err(CampusError::Validation(
                "Message must target a receiver or a group".to_string(),
            )),
            _ => {
                if self.original_text.trim().is_empty() {
                    return Err(CampusError::Validation(
                        "Message text is required".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}
