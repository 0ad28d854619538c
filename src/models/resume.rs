//! Video resume model and recruiter search filter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::CefrLevel;
use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VideoResume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub video_url: String,
    pub duration_seconds: Option<i32>,
    /// Career-path taxonomy tags, matched by overlap in recruiter search.
    pub career_paths: Vec<String>,
    pub views_count: i32,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVideoResumeRequest {
    pub user_id: Uuid,
    pub title: String,
    pub video_url: String,
    pub duration_seconds: Option<i32>,
    pub career_paths: Option<Vec<String>>,
}

/// Conjunction of optional recruiter search filters. Filters are ANDed
/// across categories; multi-valued filters are ORed within themselves.
#[derive(Debug, Clone)]
pub struct ResumeSearchFilter {
    pub college_id: Uuid,
    pub gender: Option<String>,
    /// Case-insensitive substring match over the student's name.
    pub name: Option<String>,
    pub course: Option<String>,
    pub graduation_year: Option<i32>,
    pub cefr_levels: Vec<CefrLevel>,
    pub career_paths: Vec<String>,
    pub limit: i64,
    pub offset: i64,
}

/// One page of search hits plus the total match count.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeSearchPage {
    pub items: Vec<VideoResume>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl CreateVideoResumeRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CampusError::Validation(
                "Resume title is required".to_string(),
            ));
        }
        if self.video_url.trim().is_empty() {
            return Err(CampusError::Validation(
                "Video URL is required".to_string(),
            ));
        }
        if let Some(duration) = self.duration_seconds {
            if duration <= 0 {
                return Err(CampusError::Validation(
                    "duration_seconds must be greater than 0".to_string(),
                ));
            }
        }
        Ok(())
    }
}
