//! Study group repository implementation
//!
//! Group creation and joining are single transactions: the membership row
//! and the denormalized `member_count` always move together, with the group
//! row locked while capacity is checked.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::group::{
    CreateStudyGroupRequest, GroupMembership, MembershipRole, StudyGroup, UpdateStudyGroupRequest,
};
use crate::utils::errors::{map_unique_violation, CampusError};

const GROUP_COLUMNS: &str = "id, college_id, name, description, focus, member_count, \
     max_members, is_active, next_session_at, created_at, updated_at";

const MEMBERSHIP_COLUMNS: &str = "id, group_id, user_id, role, joined_at";

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group with its creator membership. `member_count`
    /// starts at 1 and the creator row is inserted in the same transaction.
    pub async fn create(&self, request: CreateStudyGroupRequest) -> Result<StudyGroup, CampusError> {
        request.validate()?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let (creator_college,): (Uuid,) =
            sqlx::query_as("SELECT college_id FROM users WHERE id = $1")
                .bind(request.created_by)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CampusError::not_found("user", request.created_by))?;

        if creator_college != request.college_id {
            return Err(CampusError::Validation(
                "Creator belongs to a different college than the group".to_string(),
            ));
        }

        let group = sqlx::query_as::<_, StudyGroup>(&format!(
            r#"
            INSERT INTO study_groups (id, college_id, name, description, focus, member_count,
                                      max_members, next_session_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, 1, $6, $7, $8, $8)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(request.college_id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.focus)
        .bind(request.max_members)
        .bind(request.next_session_at)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO group_memberships (id, group_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(group.id)
        .bind(request.created_by)
        .bind(MembershipRole::Creator)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(group)
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StudyGroup>, CampusError> {
        let group = sqlx::query_as::<_, StudyGroup>(&format!(
            "SELECT {GROUP_COLUMNS} FROM study_groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// List groups for a college with pagination
    pub async fn list_by_college(
        &self,
        college_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StudyGroup>, CampusError> {
        let groups = sqlx::query_as::<_, StudyGroup>(&format!(
            r#"
            SELECT {GROUP_COLUMNS} FROM study_groups
            WHERE college_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(college_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Update group metadata
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateStudyGroupRequest,
    ) -> Result<StudyGroup, CampusError> {
        let group = sqlx::query_as::<_, StudyGroup>(&format!(
            r#"
            UPDATE study_groups
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                focus = COALESCE($4, focus),
                is_active = COALESCE($5, is_active),
                next_session_at = COALESCE($6, next_session_at),
                updated_at = $7
            WHERE id = $1
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.focus)
        .bind(request.is_active)
        .bind(request.next_session_at)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| CampusError::not_found("study group", id))?;

        Ok(group)
    }

    /// Join a group.
    ///
    /// One transaction: lock the group row, reject cross-college users,
    /// duplicates, and full groups, then insert the membership and bump
    /// `member_count` together.
    pub async fn join(&self, group_id: Uuid, user_id: Uuid) -> Result<GroupMembership, CampusError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, StudyGroup>(&format!(
            "SELECT {GROUP_COLUMNS} FROM study_groups WHERE id = $1 FOR UPDATE"
        ))
        .bind(group_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CampusError::not_found("study group", group_id))?;

        let (user_college,): (Uuid,) =
            sqlx::query_as("SELECT college_id FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CampusError::not_found("user", user_id))?;

        if user_college != group.college_id {
            return Err(CampusError::Validation(
                "User belongs to a different college than the group".to_string(),
            ));
        }

        let (existing,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM group_memberships WHERE group_id = $1 AND user_id = $2",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if existing > 0 {
            return Err(CampusError::Conflict(
                "User is already a member of this group".to_string(),
            ));
        }

        if group.member_count >= group.max_members {
            return Err(CampusError::CapacityExceeded { group_id });
        }

        let membership = sqlx::query_as::<_, GroupMembership>(&format!(
            r#"
            INSERT INTO group_memberships (id, group_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MEMBERSHIP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(group_id)
        .bind(user_id)
        .bind(MembershipRole::Member)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "User is already a member of this group"))?;

        sqlx::query("UPDATE study_groups SET member_count = member_count + 1, updated_at = $2 WHERE id = $1")
            .bind(group_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(membership)
    }

    /// Get group members in join order
    pub async fn get_members(&self, group_id: Uuid) -> Result<Vec<GroupMembership>, CampusError> {
        let members = sqlx::query_as::<_, GroupMembership>(&format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM group_memberships WHERE group_id = $1 ORDER BY joined_at ASC"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Get groups a user belongs to
    pub async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<StudyGroup>, CampusError> {
        let groups = sqlx::query_as::<_, StudyGroup>(
            r#"
            SELECT g.id, g.college_id, g.name, g.description, g.focus, g.member_count,
                   g.max_members, g.is_active, g.next_session_at, g.created_at, g.updated_at
            FROM study_groups g
            INNER JOIN group_memberships gm ON g.id = gm.group_id
            WHERE gm.user_id = $1 AND g.is_active = true
            ORDER BY gm.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }
}
