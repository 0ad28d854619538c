//! Practice module and progress repository implementation
//!
//! `record_progress` is a single-statement upsert so concurrent writers
//! cannot interleave between the existence check and the write. Completion
//! is one-way: `completed_at`, once set, is never overwritten.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::practice::{
    CreatePracticeModuleRequest, ModuleType, PracticeModule, RecordProgressRequest, UserProgress,
};
use crate::utils::errors::CampusError;

const MODULE_COLUMNS: &str = "id, college_id, title, module_type, difficulty, duration_minutes, \
     exercises, created_by, created_at, updated_at";

const PROGRESS_COLUMNS: &str =
    "id, user_id, module_id, progress, completed, score, completed_at, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PracticeRepository {
    pool: PgPool,
}

impl PracticeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new practice module
    pub async fn create_module(
        &self,
        request: CreatePracticeModuleRequest,
    ) -> Result<PracticeModule, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let module = sqlx::query_as::<_, PracticeModule>(&format!(
            r#"
            INSERT INTO practice_modules (id, college_id, title, module_type, difficulty,
                                          duration_minutes, exercises, created_by,
                                          created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING {MODULE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.title)
        .bind(request.module_type)
        .bind(request.difficulty)
        .bind(request.duration_minutes)
        .bind(request.exercises.unwrap_or_else(|| serde_json::json!([])))
        .bind(request.created_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(module)
    }

    /// Find module by ID
    pub async fn find_module_by_id(&self, id: Uuid) -> Result<Option<PracticeModule>, CampusError> {
        let module = sqlx::query_as::<_, PracticeModule>(&format!(
            "SELECT {MODULE_COLUMNS} FROM practice_modules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(module)
    }

    /// List modules for a college, optionally filtered by type
    pub async fn list_modules_by_college(
        &self,
        college_id: Uuid,
        module_type: Option<ModuleType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PracticeModule>, CampusError> {
        let modules = sqlx::query_as::<_, PracticeModule>(&format!(
            r#"
            SELECT {MODULE_COLUMNS} FROM practice_modules
            WHERE college_id = $1 AND ($2::module_type IS NULL OR module_type = $2)
            ORDER BY created_at ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(college_id)
        .bind(module_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(modules)
    }

    /// Record practice progress with upsert semantics.
    ///
    /// First write creates the row, later writes update it. Reaching 100
    /// sets `completed` and stamps `completed_at`; once completed, the row
    /// stays completed and neither the stored progress nor the completion
    /// timestamp moves again.
    pub async fn record_progress(
        &self,
        request: RecordProgressRequest,
    ) -> Result<UserProgress, CampusError> {
        request.validate()?;

        let progress = request.clamped_progress();
        let now = Utc::now();
        let row = sqlx::query_as::<_, UserProgress>(&format!(
            r#"
            INSERT INTO user_progress (id, user_id, module_id, progress, completed, score,
                                       completed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4 >= 100, $5,
                    CASE WHEN $4 >= 100 THEN $6 END, $6, $6)
            ON CONFLICT (user_id, module_id) DO UPDATE SET
                progress = CASE WHEN user_progress.completed
                                THEN user_progress.progress
                                ELSE excluded.progress END,
                completed = user_progress.completed OR excluded.progress >= 100,
                score = COALESCE(excluded.score, user_progress.score),
                completed_at = COALESCE(user_progress.completed_at,
                                        CASE WHEN excluded.progress >= 100 THEN $6 END),
                updated_at = $6
            RETURNING {PROGRESS_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.module_id)
        .bind(progress)
        .bind(request.score)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Get a user's progress on one module
    pub async fn get_progress(
        &self,
        user_id: Uuid,
        module_id: Uuid,
    ) -> Result<Option<UserProgress>, CampusError> {
        let row = sqlx::query_as::<_, UserProgress>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress WHERE user_id = $1 AND module_id = $2"
        ))
        .bind(user_id)
        .bind(module_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all progress rows for a user
    pub async fn list_user_progress(&self, user_id: Uuid) -> Result<Vec<UserProgress>, CampusError> {
        let rows = sqlx::query_as::<_, UserProgress>(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_progress WHERE user_id = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
