//! Job posting and application repository implementation
//!
//! Status transitions lock the application row and validate against the
//! one-way progression before writing.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job::{
    ApplicationStatus, CreateJobApplicationRequest, CreateJobPostingRequest, JobApplication,
    JobPosting,
};
use crate::utils::errors::{map_unique_violation, CampusError};

const POSTING_COLUMNS: &str = "id, college_id, recruiter_id, title, description, location, \
     job_type, skills, is_active, created_at, updated_at";

const APPLICATION_COLUMNS: &str =
    "id, job_id, applicant_id, video_resume_id, status, cover_note, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new job posting
    pub async fn create_posting(
        &self,
        request: CreateJobPostingRequest,
    ) -> Result<JobPosting, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let posting = sqlx::query_as::<_, JobPosting>(&format!(
            r#"
            INSERT INTO job_postings (id, college_id, recruiter_id, title, description,
                                      location, job_type, skills, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING {POSTING_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.recruiter_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.location)
        .bind(request.job_type)
        .bind(request.skills.unwrap_or_default())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(posting)
    }

    /// Find posting by ID
    pub async fn find_posting_by_id(&self, id: Uuid) -> Result<Option<JobPosting>, CampusError> {
        let posting = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {POSTING_COLUMNS} FROM job_postings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(posting)
    }

    /// List postings for a college, optionally only active ones
    pub async fn list_postings_by_college(
        &self,
        college_id: Uuid,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobPosting>, CampusError> {
        let postings = sqlx::query_as::<_, JobPosting>(&format!(
            r#"
            SELECT {POSTING_COLUMNS} FROM job_postings
            WHERE college_id = $1 AND (NOT $2 OR is_active)
            ORDER BY created_at ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(college_id)
        .bind(active_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(postings)
    }

    /// Submit an application; one per (job, applicant), and only within the
    /// posting's own college.
    pub async fn create_application(
        &self,
        request: CreateJobApplicationRequest,
    ) -> Result<JobApplication, CampusError> {
        let posting = self
            .find_posting_by_id(request.job_id)
            .await?
            .ok_or_else(|| CampusError::not_found("job posting", request.job_id))?;

        let (applicant_college,): (Uuid,) =
            sqlx::query_as("SELECT college_id FROM users WHERE id = $1")
                .bind(request.applicant_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| CampusError::not_found("user", request.applicant_id))?;

        if applicant_college != posting.college_id {
            return Err(CampusError::Validation(
                "Applicant belongs to a different college than the posting".to_string(),
            ));
        }

        let now = Utc::now();
        let application = sqlx::query_as::<_, JobApplication>(&format!(
            r#"
            INSERT INTO job_applications (id, job_id, applicant_id, video_resume_id,
                                          cover_note, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.job_id)
        .bind(request.applicant_id)
        .bind(request.video_resume_id)
        .bind(request.cover_note)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "User has already applied to this job"))?;

        Ok(application)
    }

    /// Find application by ID
    pub async fn find_application_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<JobApplication>, CampusError> {
        let application = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    /// List applications for a posting
    pub async fn list_applications_by_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobApplication>, CampusError> {
        let applications = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE job_id = $1 ORDER BY created_at ASC"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    /// List a user's applications
    pub async fn list_applications_by_applicant(
        &self,
        applicant_id: Uuid,
    ) -> Result<Vec<JobApplication>, CampusError> {
        let applications = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE applicant_id = $1 ORDER BY created_at ASC"
        ))
        .bind(applicant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    /// Advance an application along the status progression. Backward and
    /// out-of-terminal moves are rejected.
    pub async fn transition_status(
        &self,
        id: Uuid,
        next: ApplicationStatus,
    ) -> Result<JobApplication, CampusError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CampusError::not_found("job application", id))?;

        if !current.status.can_transition_to(next) {
            return Err(CampusError::InvalidStateTransition {
                from: format!("{:?}", current.status).to_lowercase(),
                to: format!("{next:?}").to_lowercase(),
            });
        }

        let application = sqlx::query_as::<_, JobApplication>(&format!(
            "UPDATE job_applications SET status = $2, updated_at = $3 WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(id)
        .bind(next)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(application)
    }
}
