//! API router assembly

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};

use crate::api::handlers::{
    admin, auth, colleges, files, forum, groups, jobs, messages, practice, resumes, users,
};
use crate::api::state::AppState;
use crate::database::connection;
use crate::utils::errors::CampusError;

/// Build the full API router over shared application state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/lookup", get(auth::lookup))
        .route("/api/colleges", get(colleges::list).post(colleges::create))
        .route(
            "/api/colleges/:id",
            get(colleges::get).patch(colleges::update),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id", get(users::get).patch(users::update))
        .route("/api/users/:id/cefr", post(users::assign_cefr))
        .route("/api/users/:id/role", post(users::change_role))
        .route(
            "/api/practice-modules",
            get(practice::list_modules).post(practice::create_module),
        )
        .route(
            "/api/progress",
            get(practice::list_progress).post(practice::record_progress),
        )
        .route("/api/study-groups", get(groups::list).post(groups::create))
        .route(
            "/api/study-groups/:id",
            get(groups::get).patch(groups::update),
        )
        .route("/api/study-groups/:id/join", post(groups::join))
        .route("/api/study-groups/:id/members", get(groups::members))
        .route("/api/messages", get(messages::list).post(messages::create))
        .route(
            "/api/forum/posts",
            get(forum::list_posts).post(forum::create_post),
        )
        .route("/api/forum/posts/:id", get(forum::get_post))
        .route(
            "/api/forum/posts/:id/replies",
            get(forum::list_replies).post(forum::create_reply),
        )
        .route("/api/forum/posts/:id/like", post(forum::like_post))
        .route("/api/files", get(files::list).post(files::create))
        .route("/api/files/expired", delete(files::purge_expired))
        .route(
            "/api/video-resumes",
            get(resumes::list).post(resumes::create),
        )
        .route("/api/video-resumes/search", get(resumes::search))
        .route("/api/video-resumes/:id", get(resumes::get))
        .route(
            "/api/jobs",
            get(jobs::list_postings).post(jobs::create_posting),
        )
        .route("/api/jobs/:id", get(jobs::get_posting))
        .route("/api/jobs/:id/applications", get(jobs::list_job_applications))
        .route(
            "/api/applications",
            get(jobs::list_applications).post(jobs::create_application),
        )
        .route("/api/applications/:id/status", post(jobs::transition_status))
        .route("/api/admin/moderation/:id/action", post(admin::moderate_post))
        .route("/api/admin/logs", get(admin::list_logs))
        .route(
            "/api/admin/recruiter-actions",
            get(admin::list_recruiter_actions),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, CampusError> {
    connection::health_check(&state.pool).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
