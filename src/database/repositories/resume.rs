//! Video resume repository implementation
//!
//! Recruiter search builds one WHERE clause shared by the page query and
//! the count query: filters AND across categories and OR within the
//! multi-valued ones (CEFR levels, career paths).

use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::resume::{
    CreateVideoResumeRequest, ResumeSearchFilter, ResumeSearchPage, VideoResume,
};
use crate::utils::errors::CampusError;

const RESUME_COLUMNS: &str = "id, user_id, title, video_url, duration_seconds, career_paths, \
     views_count, likes_count, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ResumeRepository {
    pool: PgPool,
}

impl ResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new video resume
    pub async fn create(&self, request: CreateVideoResumeRequest) -> Result<VideoResume, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let resume = sqlx::query_as::<_, VideoResume>(&format!(
            r#"
            INSERT INTO video_resumes (id, user_id, title, video_url, duration_seconds,
                                       career_paths, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {RESUME_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.title)
        .bind(request.video_url)
        .bind(request.duration_seconds)
        .bind(request.career_paths.unwrap_or_default())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(resume)
    }

    /// Find resume by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VideoResume>, CampusError> {
        let resume = sqlx::query_as::<_, VideoResume>(&format!(
            "SELECT {RESUME_COLUMNS} FROM video_resumes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resume)
    }

    /// List resumes belonging to one user
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<VideoResume>, CampusError> {
        let resumes = sqlx::query_as::<_, VideoResume>(&format!(
            "SELECT {RESUME_COLUMNS} FROM video_resumes WHERE user_id = $1 ORDER BY created_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(resumes)
    }

    /// Bump the view counter with a single atomic increment
    pub async fn record_view(&self, id: Uuid) -> Result<VideoResume, CampusError> {
        let resume = sqlx::query_as::<_, VideoResume>(&format!(
            "UPDATE video_resumes SET views_count = views_count + 1 WHERE id = $1 RETURNING {RESUME_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("video resume", id))?;

        Ok(resume)
    }

    /// Recruiter search: conjunction of optional filters plus pagination,
    /// returning one page of hits and the total match count.
    pub async fn search(&self, filter: &ResumeSearchFilter) -> Result<ResumeSearchPage, CampusError> {
        let mut page_query = QueryBuilder::new(
            "SELECT vr.id, vr.user_id, vr.title, vr.video_url, vr.duration_seconds, \
             vr.career_paths, vr.views_count, vr.likes_count, vr.created_at, vr.updated_at \
             FROM video_resumes vr INNER JOIN users u ON u.id = vr.user_id",
        );
        Self::apply_filters(&mut page_query, filter);
        page_query.push(" ORDER BY vr.created_at DESC LIMIT ");
        page_query.push_bind(filter.limit);
        page_query.push(" OFFSET ");
        page_query.push_bind(filter.offset);

        let items = page_query
            .build_query_as::<VideoResume>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query = QueryBuilder::new(
            "SELECT COUNT(*) FROM video_resumes vr INNER JOIN users u ON u.id = vr.user_id",
        );
        Self::apply_filters(&mut count_query, filter);

        let (total,): (i64,) = count_query.build_query_as().fetch_one(&self.pool).await?;

        Ok(ResumeSearchPage {
            items,
            total,
            limit: filter.limit,
            offset: filter.offset,
        })
    }

    fn apply_filters<'a>(query: &mut QueryBuilder<'a, Postgres>, filter: &'a ResumeSearchFilter) {
        query.push(" WHERE u.college_id = ");
        query.push_bind(filter.college_id);

        if let Some(ref gender) = filter.gender {
            query.push(" AND u.gender = ");
            query.push_bind(gender);
        }
        if let Some(ref name) = filter.name {
            query.push(" AND concat_ws(' ', u.first_name, u.last_name, u.username) ILIKE ");
            query.push_bind(format!("%{}%", escape_like(name)));
        }
        if let Some(ref course) = filter.course {
            query.push(" AND u.course = ");
            query.push_bind(course);
        }
        if let Some(year) = filter.graduation_year {
            query.push(" AND u.graduation_year = ");
            query.push_bind(year);
        }
        if !filter.cefr_levels.is_empty() {
            query.push(" AND u.cefr_level = ANY(");
            query.push_bind(&filter.cefr_levels);
            query.push(")");
        }
        if !filter.career_paths.is_empty() {
            query.push(" AND vr.career_paths && ");
            query.push_bind(&filter.career_paths);
        }
    }
}

/// LIKE wildcards in a search term match literally, not as patterns.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
