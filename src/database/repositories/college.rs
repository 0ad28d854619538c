//! College repository implementation
//!
//! Colleges are the tenant roots. They are soft-disabled via `is_active`,
//! never deleted.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::college::{College, CreateCollegeRequest, UpdateCollegeRequest};
use crate::utils::errors::{map_unique_violation, CampusError};

const COLLEGE_COLUMNS: &str =
    "id, domain, name, theme_primary, theme_secondary, is_active, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct CollegeRepository {
    pool: PgPool,
}

impl CollegeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new college
    pub async fn create(&self, request: CreateCollegeRequest) -> Result<College, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let college = sqlx::query_as::<_, College>(&format!(
            r#"
            INSERT INTO colleges (id, domain, name, theme_primary, theme_secondary, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {COLLEGE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.domain)
        .bind(request.name)
        .bind(request.theme_primary)
        .bind(request.theme_secondary)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "A college with this domain already exists"))?;

        Ok(college)
    }

    /// Find college by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<College>, CampusError> {
        let college = sqlx::query_as::<_, College>(&format!(
            "SELECT {COLLEGE_COLUMNS} FROM colleges WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(college)
    }

    /// Find college by its white-labeling domain
    pub async fn find_by_domain(&self, domain: &str) -> Result<Option<College>, CampusError> {
        let college = sqlx::query_as::<_, College>(&format!(
            "SELECT {COLLEGE_COLUMNS} FROM colleges WHERE domain = $1"
        ))
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(college)
    }

    /// List all colleges with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<College>, CampusError> {
        let colleges = sqlx::query_as::<_, College>(&format!(
            "SELECT {COLLEGE_COLUMNS} FROM colleges ORDER BY created_at ASC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(colleges)
    }

    /// Update college; the domain is the routing key and never changes here
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCollegeRequest,
    ) -> Result<College, CampusError> {
        let college = sqlx::query_as::<_, College>(&format!(
            r#"
            UPDATE colleges
            SET name = COALESCE($2, name),
                theme_primary = COALESCE($3, theme_primary),
                theme_secondary = COALESCE($4, theme_secondary),
                is_active = COALESCE($5, is_active),
                updated_at = $6
            WHERE id = $1
            RETURNING {COLLEGE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.theme_primary)
        .bind(request.theme_secondary)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("college", id))?;

        Ok(college)
    }
}
