//! Database service layer
//!
//! High-level interface over the repositories. Composite operations that
//! need an authorization check or an audit record live here; repositories
//! only perform the writes.

use uuid::Uuid;

use crate::database::{
    AuditRepository, CollegeRepository, DatabasePool, FileRepository, ForumRepository,
    GroupRepository, JobRepository, MessageRepository, PracticeRepository, ResumeRepository,
    UserRepository,
};
use crate::models::*;
use crate::utils::errors::CampusError;
use crate::utils::logging::log_admin_action;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub colleges: CollegeRepository,
    pub users: UserRepository,
    pub practice: PracticeRepository,
    pub groups: GroupRepository,
    pub messages: MessageRepository,
    pub forum: ForumRepository,
    pub files: FileRepository,
    pub resumes: ResumeRepository,
    pub jobs: JobRepository,
    pub audit: AuditRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            colleges: CollegeRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            practice: PracticeRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            messages: MessageRepository::new(pool.clone()),
            forum: ForumRepository::new(pool.clone()),
            files: FileRepository::new(pool.clone()),
            resumes: ResumeRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            audit: AuditRepository::new(pool),
        }
    }

    /// Register a user under an existing, active college
    pub async fn register_user(&self, request: CreateUserRequest) -> Result<User, CampusError> {
        let college = self
            .colleges
            .find_by_id(request.college_id)
            .await?
            .ok_or_else(|| CampusError::not_found("college", request.college_id))?;

        if !college.is_active {
            return Err(CampusError::Conflict(
                "College is disabled and does not accept registrations".to_string(),
            ));
        }

        self.users.create(request).await
    }

    /// Map an authenticated email to its (role, college) pair. This is the
    /// core's entire obligation toward the external identity provider.
    pub async fn resolve_identity(&self, email: &str) -> Result<(UserRole, Uuid), CampusError> {
        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            CampusError::NotFound {
                resource: "user",
                id: email.to_string(),
            }
        })?;

        Ok((user.role, user.college_id))
    }

    /// Resolve the acting user for a privileged operation
    async fn require_actor(&self, actor_email: &str) -> Result<User, CampusError> {
        self.users
            .find_by_email(actor_email)
            .await?
            .ok_or_else(|| CampusError::Unauthorized("Unknown acting user".to_string()))
    }

    /// Actors operate within their own college; only super admins cross
    /// tenant boundaries.
    fn check_tenant(actor: &User, college_id: Uuid) -> Result<(), CampusError> {
        if actor.role != UserRole::SuperAdmin && actor.college_id != college_id {
            return Err(CampusError::Unauthorized(
                "Actor belongs to a different college".to_string(),
            ));
        }
        Ok(())
    }

    /// Assign a CEFR level. Trainer/admin only, never self-assigned.
    pub async fn assign_cefr(
        &self,
        actor_email: &str,
        user_id: Uuid,
        level: CefrLevel,
    ) -> Result<User, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_assign_cefr() {
            return Err(CampusError::Unauthorized(
                "Only trainers and admins may assign CEFR levels".to_string(),
            ));
        }

        let target = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CampusError::not_found("user", user_id))?;
        Self::check_tenant(&actor, target.college_id)?;

        self.users.assign_cefr(user_id, level).await
    }

    /// Change a user's role. Admin only.
    pub async fn change_role(
        &self,
        actor_email: &str,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_manage_roles() {
            return Err(CampusError::Unauthorized(
                "Only admins may change user roles".to_string(),
            ));
        }

        let target = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CampusError::not_found("user", user_id))?;
        Self::check_tenant(&actor, target.college_id)?;

        let updated = self.users.change_role(user_id, role).await?;

        self.audit
            .record_admin_log(RecordAdminLogRequest {
                college_id: updated.college_id,
                actor_id: actor.id,
                action: "change_role".to_string(),
                target_id: Some(user_id),
                details: Some(serde_json::json!({ "new_role": role })),
            })
            .await?;
        log_admin_action(actor.id, "change_role", Some(&user_id.to_string()));

        Ok(updated)
    }

    /// Apply moderation flags to a forum post and write the audit trail
    pub async fn moderate_post(
        &self,
        actor_email: &str,
        post_id: Uuid,
        request: ModerateForumPostRequest,
    ) -> Result<ForumPost, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_moderate() {
            return Err(CampusError::Unauthorized(
                "Only moderators and admins may moderate posts".to_string(),
            ));
        }

        let post = self
            .forum
            .find_post_by_id(post_id)
            .await?
            .ok_or_else(|| CampusError::not_found("forum post", post_id))?;
        Self::check_tenant(&actor, post.college_id)?;

        let moderated = self.forum.moderate_post(post_id, request.clone()).await?;

        self.audit
            .record_admin_log(RecordAdminLogRequest {
                college_id: moderated.college_id,
                actor_id: actor.id,
                action: "moderate_post".to_string(),
                target_id: Some(post_id),
                details: Some(serde_json::json!({
                    "is_sticky": request.is_sticky,
                    "is_locked": request.is_locked,
                    "is_pinned": request.is_pinned,
                })),
            })
            .await?;
        log_admin_action(actor.id, "moderate_post", Some(&post_id.to_string()));

        Ok(moderated)
    }

    /// Drive the application pipeline. Recruiter-side roles only.
    pub async fn transition_application(
        &self,
        actor_email: &str,
        application_id: Uuid,
        next: ApplicationStatus,
    ) -> Result<JobApplication, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_review_applications() {
            return Err(CampusError::Unauthorized(
                "Only recruiters may update application status".to_string(),
            ));
        }

        self.jobs.transition_status(application_id, next).await
    }

    /// Recruiter resume search; every search leaves a recruiter action row
    pub async fn search_resumes(
        &self,
        actor_email: &str,
        filter: ResumeSearchFilter,
    ) -> Result<ResumeSearchPage, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_review_applications() {
            return Err(CampusError::Unauthorized(
                "Only recruiters may search video resumes".to_string(),
            ));
        }
        Self::check_tenant(&actor, filter.college_id)?;

        let page = self.resumes.search(&filter).await?;

        self.audit
            .record_recruiter_action(RecordRecruiterActionRequest {
                college_id: filter.college_id,
                recruiter_id: actor.id,
                action: "search_resumes".to_string(),
                details: Some(serde_json::json!({
                    "name": filter.name,
                    "course": filter.course,
                    "graduation_year": filter.graduation_year,
                    "cefr_levels": filter.cefr_levels,
                    "career_paths": filter.career_paths,
                    "total": page.total,
                })),
            })
            .await?;

        Ok(page)
    }

    /// List the admin audit trail. Admin only.
    pub async fn list_admin_logs(
        &self,
        actor_email: &str,
        college_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AdminLog>, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_manage_roles() {
            return Err(CampusError::Unauthorized(
                "Only admins may read the audit trail".to_string(),
            ));
        }
        Self::check_tenant(&actor, college_id)?;

        self.audit.list_admin_logs(college_id, limit, offset).await
    }

    /// List recorded recruiter actions. Admin only.
    pub async fn list_recruiter_actions(
        &self,
        actor_email: &str,
        college_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecruiterAction>, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_manage_roles() {
            return Err(CampusError::Unauthorized(
                "Only admins may read the audit trail".to_string(),
            ));
        }
        Self::check_tenant(&actor, college_id)?;

        self.audit
            .list_recruiter_actions(college_id, limit, offset)
            .await
    }

    /// Cleanup sweep: remove expired temporary files and ephemeral messages
    pub async fn purge_expired(&self, actor_email: &str) -> Result<serde_json::Value, CampusError> {
        let actor = self.require_actor(actor_email).await?;
        if !actor.role.can_moderate() {
            return Err(CampusError::Unauthorized(
                "Only admins may run the cleanup sweep".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let files_deleted = self.files.delete_expired(now).await?;
        let messages_deleted = self.messages.delete_expired(now).await?;

        log_admin_action(actor.id, "purge_expired", None);

        Ok(serde_json::json!({
            "files_deleted": files_deleted,
            "messages_deleted": messages_deleted,
        }))
    }
}
