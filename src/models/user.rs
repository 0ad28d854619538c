//! User model
//!
//! Users belong to exactly one college. Role, proficiency, and CEFR unions
//! are closed enums stored as Postgres enum types and matched exhaustively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Professor,
    Moderator,
    MasterTrainer,
    Recruiter,
    RecruitmentCoordinator,
    Admin,
    SuperAdmin,
}

impl UserRole {
    /// CEFR levels are assigned only by trainers and admins, never
    /// self-assigned.
    pub fn can_assign_cefr(&self) -> bool {
        matches!(
            self,
            UserRole::MasterTrainer | UserRole::Admin | UserRole::SuperAdmin
        )
    }

    /// Role changes are an admin-only operation.
    pub fn can_manage_roles(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SuperAdmin)
    }

    pub fn can_moderate(&self) -> bool {
        matches!(
            self,
            UserRole::Moderator | UserRole::Admin | UserRole::SuperAdmin
        )
    }

    /// Roles allowed to drive the job-application pipeline.
    pub fn can_review_applications(&self) -> bool {
        matches!(
            self,
            UserRole::Recruiter
                | UserRole::RecruitmentCoordinator
                | UserRole::Admin
                | UserRole::SuperAdmin
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "proficiency_level", rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Common European Framework of Reference proficiency tier, A1 lowest
/// through C2 highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "cefr_level")]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl sqlx::postgres::PgHasArrayType for CefrLevel {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_cefr_level")
    }
}

impl FromStr for CefrLevel {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(CampusError::Validation(format!(
                "Unknown CEFR level: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub college_id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub proficiency_level: ProficiencyLevel,
    pub cefr_level: Option<CefrLevel>,
    pub speaking_score: i32,
    pub writing_score: i32,
    pub reading_score: i32,
    pub practice_hours: f64,
    pub streak_days: i32,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub graduation_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub college_id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub proficiency_level: Option<ProficiencyLevel>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub graduation_year: Option<i32>,
}

/// Partial update. Tenant, role, and CEFR level are deliberately absent:
/// `college_id` is immutable, the other two change only through their
/// dedicated admin operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub proficiency_level: Option<ProficiencyLevel>,
    pub speaking_score: Option<i32>,
    pub writing_score: Option<i32>,
    pub reading_score: Option<i32>,
    pub practice_hours: Option<f64>,
    pub streak_days: Option<i32>,
    pub gender: Option<String>,
    pub course: Option<String>,
    pub graduation_year: Option<i32>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CampusError::Validation("Username is required".to_string()));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(CampusError::Validation(
                "A valid email address is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<()> {
        for (label, score) in [
            ("speaking_score", self.speaking_score),
            ("writing_score", self.writing_score),
            ("reading_score", self.reading_score),
        ] {
            if let Some(value) = score {
                if !(0..=100).contains(&value) {
                    return Err(CampusError::Validation(format!(
                        "{label} must be between 0 and 100"
                    )));
                }
            }
        }
        if let Some(hours) = self.practice_hours {
            if hours < 0.0 {
                return Err(CampusError::Validation(
                    "practice_hours must not be negative".to_string(),
                ));
            }
        }
        if let Some(streak) = self.streak_days {
            if streak < 0 {
                return Err(CampusError::Validation(
                    "streak_days must not be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}
