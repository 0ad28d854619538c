//! Job posting and application models
//!
//! Application status is a one-way progression: pending -> reviewing ->
//! interview -> accepted or rejected. Accepted and rejected are terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    fn stage(&self) -> u8 {
        match self {
            ApplicationStatus::Pending => 0,
            ApplicationStatus::Reviewing => 1,
            ApplicationStatus::Interview => 2,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Accepted | ApplicationStatus::Rejected
        )
    }

    /// Forward moves along the progression are allowed, including skipping
    /// intermediate stages; terminal states allow no further transition.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        !self.is_terminal() && next.stage() > self.stage()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: Uuid,
    pub college_id: Uuid,
    pub recruiter_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub skills: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub video_resume_id: Option<Uuid>,
    pub status: ApplicationStatus,
    pub cover_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobPostingRequest {
    pub college_id: Uuid,
    pub recruiter_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobApplicationRequest {
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub video_resume_id: Option<Uuid>,
    pub cover_note: Option<String>,
}

impl CreateJobPostingRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CampusError::Validation("Job title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(CampusError::Validation(
                "Job description is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Reviewing));
        assert!(ApplicationStatus::Reviewing.can_transition_to(ApplicationStatus::Interview));
        assert!(ApplicationStatus::Interview.can_transition_to(ApplicationStatus::Accepted));
        assert!(ApplicationStatus::Interview.can_transition_to(ApplicationStatus::Rejected));
        // Skipping stages forward is still a forward move.
        assert!(ApplicationStatus::Pending.can_transition_to(ApplicationStatus::Accepted));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!ApplicationStatus::Reviewing.can_transition_to(ApplicationStatus::Pending));
        assert!(!ApplicationStatus::Interview.can_transition_to(ApplicationStatus::Reviewing));
    }

    #[test]
    fn test_terminal_states_allow_nothing() {
        for next in [
            ApplicationStatus::Pending,
            ApplicationStatus::Reviewing,
            ApplicationStatus::Interview,
            ApplicationStatus::Rejected,
        ] {
            assert!(!ApplicationStatus::Accepted.can_transition_to(next));
        }
        assert!(!ApplicationStatus::Rejected.can_transition_to(ApplicationStatus::Accepted));
    }
}
