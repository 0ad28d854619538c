//! Practice module and user progress models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "module_type", rename_all = "snake_case")]
pub enum ModuleType {
    Speaking,
    Writing,
    Reading,
    Listening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "difficulty_level", rename_all = "snake_case")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PracticeModule {
    pub id: Uuid,
    pub college_id: Uuid,
    pub title: String,
    pub module_type: ModuleType,
    pub difficulty: DifficultyLevel,
    pub duration_minutes: i32,
    /// Ordered exercise specifications, opaque to the backend and
    /// interpreted only by the view layer.
    pub exercises: serde_json::Value,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub module_id: Uuid,
    pub progress: i32,
    pub completed: bool,
    pub score: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePracticeModuleRequest {
    pub college_id: Uuid,
    pub title: String,
    pub module_type: ModuleType,
    pub difficulty: DifficultyLevel,
    pub duration_minutes: i32,
    pub exercises: Option<serde_json::Value>,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordProgressRequest {
    pub user_id: Uuid,
    pub module_id: Uuid,
    pub progress: i32,
    pub score: Option<i32>,
}

impl CreatePracticeModuleRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CampusError::Validation(
                "Module title is required".to_string(),
            ));
        }
        if self.duration_minutes <= 0 {
            return Err(CampusError::Validation(
                "duration_minutes must be greater than 0".to_string(),
            ));
        }
        if let Some(ref exercises) = self.exercises {
            if !exercises.is_array() {
                return Err(CampusError::Validation(
                    "exercises must be an ordered list".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl RecordProgressRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(score) = self.score {
            if !(0..=100).contains(&score) {
                return Err(CampusError::Validation(
                    "score must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Progress is stored clamped to the 0..=100 range.
    pub fn clamped_progress(&self) -> i32 {
        self.progress.clamp(0, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_request_rejects_non_list_exercises() {
        let request = CreatePracticeModuleRequest {
            college_id: Uuid::new_v4(),
            title: "Small talk drills".to_string(),
            module_type: ModuleType::Speaking,
            difficulty: DifficultyLevel::Beginner,
            duration_minutes: 15,
            exercises: Some(serde_json::json!({"not": "a list"})),
            created_by: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_progress_is_clamped() {
        let request = RecordProgressRequest {
            user_id: Uuid::new_v4(),
            module_id: Uuid::new_v4(),
            progress: 140,
            score: None,
        };
        assert_eq!(request.clamped_progress(), 100);

        let request = RecordProgressRequest {
            progress: -10,
            ..request
        };
        assert_eq!(request.clamped_progress(), 0);
    }
}
