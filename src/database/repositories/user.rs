//! User repository implementation
//!
//! All list queries are tenant-filtered by a required `college_id`.
//! `college_id` is never part of an UPDATE: tenant reassignment is
//! structurally impossible.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{CefrLevel, CreateUserRequest, UpdateUserRequest, User, UserRole};
use crate::utils::errors::{map_unique_violation, CampusError};

const USER_COLUMNS: &str = "id, college_id, username, email, first_name, last_name, role, \
     proficiency_level, cefr_level, speaking_score, writing_score, reading_score, \
     practice_hours, streak_days, gender, course, graduation_year, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, college_id, username, email, first_name, last_name,
                               role, proficiency_level, gender, course, graduation_year,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.username)
        .bind(request.email)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.role.unwrap_or(UserRole::Student))
        .bind(
            request
                .proficiency_level
                .unwrap_or(crate::models::user::ProficiencyLevel::Beginner),
        )
        .bind(request.gender)
        .bind(request.course)
        .bind(request.graduation_year)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, "Username or email already registered in this college")
        })?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CampusError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    /// Find user by email. Emails are unique within a college; when the same
    /// address exists under several tenants the earliest registration wins.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, CampusError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users for a college, optionally filtered by role
    pub async fn list_by_college(
        &self,
        college_id: Uuid,
        role: Option<UserRole>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, CampusError> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE college_id = $1 AND ($2::user_role IS NULL OR role = $2)
            ORDER BY created_at ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(college_id)
        .bind(role)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Update user profile fields
    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> Result<User, CampusError> {
        request.validate()?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                proficiency_level = COALESCE($4, proficiency_level),
                speaking_score = COALESCE($5, speaking_score),
                writing_score = COALESCE($6, writing_score),
                reading_score = COALESCE($7, reading_score),
                practice_hours = COALESCE($8, practice_hours),
                streak_days = COALESCE($9, streak_days),
                gender = COALESCE($10, gender),
                course = COALESCE($11, course),
                graduation_year = COALESCE($12, graduation_year),
                updated_at = $13
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.proficiency_level)
        .bind(request.speaking_score)
        .bind(request.writing_score)
        .bind(request.reading_score)
        .bind(request.practice_hours)
        .bind(request.streak_days)
        .bind(request.gender)
        .bind(request.course)
        .bind(request.graduation_year)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("user", id))?;

        Ok(user)
    }

    /// Assign a CEFR level. The role check lives in the service layer; this
    /// only performs the write.
    pub async fn assign_cefr(&self, id: Uuid, level: CefrLevel) -> Result<User, CampusError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET cefr_level = $2, updated_at = $3 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(level)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("user", id))?;

        Ok(user)
    }

    /// Change a user's role
    pub async fn change_role(&self, id: Uuid, role: UserRole) -> Result<User, CampusError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $2, updated_at = $3 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("user", id))?;

        Ok(user)
    }
}
