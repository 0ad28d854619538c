//! Job posting and application handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::{ActorEmail, Pagination};
use crate::api::state::AppState;
use crate::models::job::{
    ApplicationStatus, CreateJobApplicationRequest, CreateJobPostingRequest, JobApplication,
    JobPosting,
};
use crate::utils::errors::CampusError;

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    pub college_id: Uuid,
    pub active_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    pub applicant_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct TransitionStatusRequest {
    pub status: ApplicationStatus,
}

pub async fn list_postings(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<JobPosting>>, CampusError> {
    let postings = state
        .db
        .jobs
        .list_postings_by_college(
            query.college_id,
            query.active_only.unwrap_or(true),
            page.limit(),
            page.offset(),
        )
        .await?;
    Ok(Json(postings))
}

pub async fn create_posting(
    State(state): State<AppState>,
    Json(request): Json<CreateJobPostingRequest>,
) -> Result<(StatusCode, Json<JobPosting>), CampusError> {
    let posting = state.db.jobs.create_posting(request).await?;
    Ok((StatusCode::CREATED, Json(posting)))
}

pub async fn get_posting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobPosting>, CampusError> {
    let posting = state
        .db
        .jobs
        .find_posting_by_id(id)
        .await?
        .ok_or_else(|| CampusError::not_found("job posting", id))?;
    Ok(Json(posting))
}

pub async fn list_job_applications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<JobApplication>>, CampusError> {
    let applications = state.db.jobs.list_applications_by_job(id).await?;
    Ok(Json(applications))
}

pub async fn create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateJobApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplication>), CampusError> {
    let application = state.db.jobs.create_application(request).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Json<Vec<JobApplication>>, CampusError> {
    let applications = state
        .db
        .jobs
        .list_applications_by_applicant(query.applicant_id)
        .await?;
    Ok(Json(applications))
}

pub async fn transition_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ActorEmail(actor): ActorEmail,
    Json(request): Json<TransitionStatusRequest>,
) -> Result<Json<JobApplication>, CampusError> {
    let application = state
        .db
        .transition_application(&actor, id, request.status)
        .await?;
    Ok(Json(application))
}
