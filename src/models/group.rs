//! Study group and membership models
//!
//! The group's `member_count` is a denormalized counter; it is only ever
//! written in the same transaction as the membership row it tracks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "membership_role", rename_all = "snake_case")]
pub enum MembershipRole {
    Member,
    Admin,
    Creator,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudyGroup {
    pub id: Uuid,
    pub college_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub focus: Option<String>,
    pub member_count: i32,
    pub max_members: i32,
    pub is_active: bool,
    pub next_session_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupMembership {
    pub id: Uuid,
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudyGroupRequest {
    pub college_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub focus: Option<String>,
    pub max_members: i32,
    /// Creator gets the first membership row; `member_count` starts at 1.
    pub created_by: Uuid,
    pub next_session_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStudyGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub focus: Option<String>,
    pub is_active: Option<bool>,
    pub next_session_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGroupRequest {
    pub user_id: Uuid,
}

impl CreateStudyGroupRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CampusError::Validation(
                "Group name is required".to_string(),
            ));
        }
        if self.max_members < 1 {
            return Err(CampusError::Validation(
                "max_members must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_zero_capacity() {
        let request = CreateStudyGroupRequest {
            college_id: Uuid::new_v4(),
            name: "IELTS prep".to_string(),
            description: None,
            focus: Some("speaking".to_string()),
            max_members: 0,
            created_by: Uuid::new_v4(),
            next_session_at: None,
        };
        assert!(request.validate().is_err());
    }
}
