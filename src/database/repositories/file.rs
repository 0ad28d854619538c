//! Shared file repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::file::{CreateSharedFileRequest, SharedFile};
use crate::utils::errors::CampusError;

const FILE_COLUMNS: &str = "id, college_id, uploader_id, file_name, file_url, mime_type, \
     size_bytes, is_temporary, expires_at, created_at";

#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store file metadata; the bytes live in external object storage
    pub async fn create(&self, request: CreateSharedFileRequest) -> Result<SharedFile, CampusError> {
        request.validate()?;

        let file = sqlx::query_as::<_, SharedFile>(&format!(
            r#"
            INSERT INTO shared_files (id, college_id, uploader_id, file_name, file_url,
                                      mime_type, size_bytes, is_temporary, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {FILE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.uploader_id)
        .bind(request.file_name)
        .bind(request.file_url)
        .bind(request.mime_type)
        .bind(request.size_bytes)
        .bind(request.is_temporary.unwrap_or(false))
        .bind(request.expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(file)
    }

    /// Find file by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SharedFile>, CampusError> {
        let file = sqlx::query_as::<_, SharedFile>(&format!(
            "SELECT {FILE_COLUMNS} FROM shared_files WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    /// List files for a college, optionally restricted to one uploader
    pub async fn list_by_college(
        &self,
        college_id: Uuid,
        uploader_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SharedFile>, CampusError> {
        let files = sqlx::query_as::<_, SharedFile>(&format!(
            r#"
            SELECT {FILE_COLUMNS} FROM shared_files
            WHERE college_id = $1 AND ($2::uuid IS NULL OR uploader_id = $2)
            ORDER BY created_at ASC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(college_id)
        .bind(uploader_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    /// Cleanup-sweep contract: delete every temporary file whose expiry has
    /// passed. Returns the number of rows deleted.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, CampusError> {
        let result =
            sqlx::query("DELETE FROM shared_files WHERE is_temporary AND expires_at < $1")
                .bind(now)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
