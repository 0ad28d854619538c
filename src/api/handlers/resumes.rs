//! Video resume handlers, including recruiter search

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::{ActorEmail, Pagination};
use crate::api::state::AppState;
use crate::models::resume::{
    CreateVideoResumeRequest, ResumeSearchFilter, ResumeSearchPage, VideoResume,
};
use crate::models::user::CefrLevel;
use crate::utils::errors::CampusError;

#[derive(Debug, Deserialize)]
pub struct ResumeListQuery {
    pub user_id: Uuid,
}

/// Multi-valued filters arrive comma-separated, e.g. `cefr_levels=B2,C1`.
#[derive(Debug, Deserialize)]
pub struct ResumeSearchQuery {
    pub college_id: Uuid,
    pub gender: Option<String>,
    pub name: Option<String>,
    pub course: Option<String>,
    pub graduation_year: Option<i32>,
    pub cefr_levels: Option<String>,
    pub career_paths: Option<String>,
}

impl ResumeSearchQuery {
    fn into_filter(self, page: Pagination) -> Result<ResumeSearchFilter, CampusError> {
        let cefr_levels = match self.cefr_levels {
            Some(raw) => raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| part.trim().parse::<CefrLevel>())
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let career_paths = self
            .career_paths
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ResumeSearchFilter {
            college_id: self.college_id,
            gender: self.gender,
            name: self.name,
            course: self.course,
            graduation_year: self.graduation_year,
            cefr_levels,
            career_paths,
            limit: page.limit(),
            offset: page.offset(),
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ResumeListQuery>,
) -> Result<Json<Vec<VideoResume>>, CampusError> {
    let resumes = state.db.resumes.list_by_user(query.user_id).await?;
    Ok(Json(resumes))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateVideoResumeRequest>,
) -> Result<(StatusCode, Json<VideoResume>), CampusError> {
    let resume = state.db.resumes.create(request).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// Viewing a resume counts toward its view counter.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VideoResume>, CampusError> {
    let resume = state.db.resumes.record_view(id).await?;
    Ok(Json(resume))
}

pub async fn search(
    State(state): State<AppState>,
    ActorEmail(actor): ActorEmail,
    Query(query): Query<ResumeSearchQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<ResumeSearchPage>, CampusError> {
    let filter = query.into_filter(page)?;
    let result = state.db.search_resumes(&actor, filter).await?;
    Ok(Json(result))
}
