//! Shared file model
//!
//! File bytes live in external object storage; only URL and metadata are
//! persisted here. Temporary files must carry an expiry and are removed by
//! the cleanup sweep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SharedFile {
    pub id: Uuid,
    pub college_id: Uuid,
    pub uploader_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub is_temporary: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharedFileRequest {
    pub college_id: Uuid,
    pub uploader_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub is_temporary: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateSharedFileRequest {
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(CampusError::Validation("File name is required".to_string()));
        }
        if self.file_url.trim().is_empty() {
            return Err(CampusError::Validation("File URL is required".to_string()));
        }
        if self.size_bytes < 0 {
            return Err(CampusError::Validation(
                "size_bytes must not be negative".to_string(),
            ));
        }
        if self.is_temporary.unwrap_or(false) && self.expires_at.is_none() {
            return Err(CampusError::Validation(
                "Temporary files require an expires_at timestamp".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_file_requires_expiry() {
        let request = CreateSharedFileRequest {
            college_id: Uuid::new_v4(),
            uploader_id: Uuid::new_v4(),
            file_name: "notes.pdf".to_string(),
            file_url: "https://storage.example.com/notes.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 1024,
            is_temporary: Some(true),
            expires_at: None,
        };
        assert!(request.validate().is_err());

        let request = CreateSharedFileRequest {
            expires_at: Some(Utc::now()),
            ..request
        };
        assert!(request.validate().is_ok());
    }
}
