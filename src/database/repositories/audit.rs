//! Audit trail repository implementation
//!
//! Recruiter actions and admin logs are append-only: insert and list, no
//! update or delete paths exist.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::audit::{
    AdminLog, RecordAdminLogRequest, RecordRecruiterActionRequest, RecruiterAction,
};
use crate::utils::errors::CampusError;

const RECRUITER_COLUMNS: &str = "id, college_id, recruiter_id, action, details, created_at";

const ADMIN_LOG_COLUMNS: &str = "id, college_id, actor_id, action, target_id, details, created_at";

#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a recruiter action
    pub async fn record_recruiter_action(
        &self,
        request: RecordRecruiterActionRequest,
    ) -> Result<RecruiterAction, CampusError> {
        let action = sqlx::query_as::<_, RecruiterAction>(&format!(
            r#"
            INSERT INTO recruiter_actions (id, college_id, recruiter_id, action, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RECRUITER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.recruiter_id)
        .bind(request.action)
        .bind(request.details.unwrap_or_else(|| serde_json::json!({})))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(action)
    }

    /// List recruiter actions for a college, newest first
    pub async fn list_recruiter_actions(
        &self,
        college_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecruiterAction>, CampusError> {
        let actions = sqlx::query_as::<_, RecruiterAction>(&format!(
            r#"
            SELECT {RECRUITER_COLUMNS} FROM recruiter_actions
            WHERE college_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(college_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(actions)
    }

    /// Record an admin action
    pub async fn record_admin_log(
        &self,
        request: RecordAdminLogRequest,
    ) -> Result<AdminLog, CampusError> {
        let log = sqlx::query_as::<_, AdminLog>(&format!(
            r#"
            INSERT INTO admin_logs (id, college_id, actor_id, action, target_id, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ADMIN_LOG_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.actor_id)
        .bind(request.action)
        .bind(request.target_id)
        .bind(request.details)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(log)
    }

    /// List admin logs for a college, newest first
    pub async fn list_admin_logs(
        &self,
        college_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdminLog>, CampusError> {
        let logs = sqlx::query_as::<_, AdminLog>(&format!(
            r#"
            SELECT {ADMIN_LOG_COLUMNS} FROM admin_logs
            WHERE college_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(college_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
