//! Tenant isolation integration tests
//!
//! List queries are scoped by a required college filter, the same email can
//! register under different colleges, and a profile update can never move a
//! user between tenants.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;

use campus_yuva::database::DatabaseService;
use campus_yuva::models::*;
use campus_yuva::CampusError;

#[tokio::test]
#[serial]
async fn test_lists_are_scoped_to_one_college() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;

    for i in 0..3 {
        create_test_user(
            &service,
            du.id,
            &format!("du_student{i}"),
            &format!("du{i}@example.com"),
            UserRole::Student,
        )
        .await;
    }
    create_test_user(&service, mu.id, "mu_student", "mu@example.com", UserRole::Student).await;

    let du_users = service
        .users
        .list_by_college(du.id, None, 50, 0)
        .await
        .expect("list du");
    let mu_users = service
        .users
        .list_by_college(mu.id, None, 50, 0)
        .await
        .expect("list mu");

    assert_eq!(du_users.len(), 3);
    assert_eq!(mu_users.len(), 1);
    assert!(du_users.iter().all(|u| u.college_id == du.id));

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_same_email_allowed_across_colleges_but_not_within() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;

    create_test_user(&service, du.id, "arjun", "arjun@example.com", UserRole::Student).await;
    // Same address under a different tenant is fine.
    create_test_user(&service, mu.id, "arjun", "arjun@example.com", UserRole::Student).await;

    // Duplicate within the same tenant conflicts.
    let err = service
        .register_user(CreateUserRequest {
            college_id: du.id,
            username: "arjun2".to_string(),
            email: "arjun@example.com".to_string(),
            first_name: None,
            last_name: None,
            role: None,
            proficiency_level: None,
            gender: None,
            course: None,
            graduation_year: None,
        })
        .await
        .expect_err("duplicate email within college must fail");
    assert_matches!(err, CampusError::Conflict(_));

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_identity_resolves_to_earliest_registration() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;

    let first =
        create_test_user(&service, du.id, "arjun", "arjun@example.com", UserRole::Student).await;
    create_test_user(&service, mu.id, "arjun", "arjun@example.com", UserRole::Student).await;

    let (role, college_id) = service
        .resolve_identity("arjun@example.com")
        .await
        .expect("resolve");
    assert_eq!(role, UserRole::Student);
    assert_eq!(college_id, first.college_id);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_profile_update_cannot_move_user_between_colleges() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    create_test_college(&service, "mu", "Mumbai University").await;

    let user = create_test_user(&service, du.id, "arjun", "arjun@example.com", UserRole::Student).await;

    let updated = service
        .users
        .update(
            user.id,
            UpdateUserRequest {
                first_name: Some("Arjun".to_string()),
                course: Some("B.Tech CSE".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.college_id, du.id);
    assert_eq!(updated.first_name.as_deref(), Some("Arjun"));

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_direct_message_cannot_cross_colleges() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;

    let sender =
        create_test_user(&service, du.id, "arjun", "arjun@example.com", UserRole::Student).await;
    let outsider =
        create_test_user(&service, mu.id, "priya", "priya@example.com", UserRole::Student).await;

    let err = service
        .messages
        .create(CreateChatMessageRequest {
            college_id: du.id,
            sender_id: sender.id,
            receiver_id: Some(outsider.id),
            group_id: None,
            original_text: "hello over there".to_string(),
            corrected_text: None,
            suggestions: None,
            expires_at: None,
        })
        .await
        .expect_err("message to another college's user must fail");
    assert_matches!(err, CampusError::Validation(_));

    let conversation = service
        .messages
        .list_direct_messages(du.id, sender.id, outsider.id, 50, 0)
        .await
        .expect("list");
    assert!(conversation.is_empty());

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_admin_cannot_act_across_tenants() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;

    create_test_user(&service, du.id, "du_admin", "admin@du.example.com", UserRole::Admin).await;
    let mu_student =
        create_test_user(&service, mu.id, "priya", "priya@example.com", UserRole::Student).await;

    let err = service
        .change_role("admin@du.example.com", mu_student.id, UserRole::Moderator)
        .await
        .expect_err("cross-tenant role change must fail");
    assert_matches!(err, CampusError::Unauthorized(_));

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_super_admin_crosses_tenants() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;

    create_test_user(&service, du.id, "root", "root@example.com", UserRole::SuperAdmin).await;
    let mu_student =
        create_test_user(&service, mu.id, "priya", "priya@example.com", UserRole::Student).await;

    let updated = service
        .assign_cefr("root@example.com", mu_student.id, CefrLevel::B2)
        .await
        .expect("super admin CEFR assignment");
    assert_eq!(updated.cefr_level, Some(CefrLevel::B2));

    db.cleanup().await.expect("cleanup");
}
