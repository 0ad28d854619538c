//! Group membership integration tests
//!
//! Covers the capacity invariant: the membership row and the denormalized
//! member count always move together, full groups and double joins are
//! rejected without side effects.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;

use campus_yuva::database::DatabaseService;
use campus_yuva::models::*;
use campus_yuva::CampusError;

#[tokio::test]
#[serial]
async fn test_join_increments_member_count() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let college = create_test_college(&service, "ncc", "North City College").await;
    let creator = create_test_user(
        &service,
        college.id,
        "creator",
        "creator@example.com",
        UserRole::Student,
    )
    .await;
    let group = create_test_group(&service, college.id, creator.id, "Debate club", 10).await;
    assert_eq!(group.member_count, 1);

    for i in 0..3 {
        let user = create_test_user(
            &service,
            college.id,
            &format!("member{i}"),
            &format!("member{i}@example.com"),
            UserRole::Student,
        )
        .await;
        service.groups.join(group.id, user.id).await.expect("join");
    }

    let group = service
        .groups
        .find_by_id(group.id)
        .await
        .expect("find")
        .expect("group exists");
    assert_eq!(group.member_count, 4);

    let members = service.groups.get_members(group.id).await.expect("members");
    assert_eq!(members.len(), 4);
    assert_eq!(members[0].role, MembershipRole::Creator);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_double_join_conflicts_and_leaves_count_unchanged() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let college = create_test_college(&service, "ncc", "North City College").await;
    let creator = create_test_user(
        &service,
        college.id,
        "creator",
        "creator@example.com",
        UserRole::Student,
    )
    .await;
    let member = create_test_user(
        &service,
        college.id,
        "member",
        "member@example.com",
        UserRole::Student,
    )
    .await;
    let group = create_test_group(&service, college.id, creator.id, "Book circle", 10).await;

    service.groups.join(group.id, member.id).await.expect("first join");
    let err = service
        .groups
        .join(group.id, member.id)
        .await
        .expect_err("second join must fail");
    assert_matches!(err, CampusError::Conflict(_));

    let group = service
        .groups
        .find_by_id(group.id)
        .await
        .expect("find")
        .expect("group exists");
    assert_eq!(group.member_count, 2);

    db.cleanup().await.expect("cleanup");
}

/// End-to-end scenario: Delhi University, one-seat group, second join fails
/// with CapacityExceeded and the count stays put.
#[tokio::test]
#[serial]
async fn test_full_group_rejects_join_with_capacity_exceeded() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let college = create_test_college(&service, "du", "Delhi University").await;
    let arjun = create_test_user(
        &service,
        college.id,
        "arjun",
        "arjun@example.com",
        UserRole::Student,
    )
    .await;
    let priya = create_test_user(
        &service,
        college.id,
        "priya",
        "priya@example.com",
        UserRole::Student,
    )
    .await;

    // Creator takes the only seat.
    let group = create_test_group(&service, college.id, arjun.id, "Solo study", 1).await;
    assert_eq!(group.member_count, 1);

    let err = service
        .groups
        .join(group.id, priya.id)
        .await
        .expect_err("join beyond capacity must fail");
    assert_matches!(err, CampusError::CapacityExceeded { group_id } if group_id == group.id);

    let group = service
        .groups
        .find_by_id(group.id)
        .await
        .expect("find")
        .expect("group exists");
    assert_eq!(group.member_count, 1);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_join_rejects_user_from_another_college() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;

    let creator =
        create_test_user(&service, du.id, "arjun", "arjun@example.com", UserRole::Student).await;
    let outsider =
        create_test_user(&service, mu.id, "priya", "priya@example.com", UserRole::Student).await;
    let group = create_test_group(&service, du.id, creator.id, "Debate club", 10).await;

    let err = service
        .groups
        .join(group.id, outsider.id)
        .await
        .expect_err("cross-college join must fail");
    assert_matches!(err, CampusError::Validation(_));

    let group = service
        .groups
        .find_by_id(group.id)
        .await
        .expect("find")
        .expect("group exists");
    assert_eq!(group.member_count, 1);

    let members = service.groups.get_members(group.id).await.expect("members");
    assert_eq!(members.len(), 1);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_join_missing_group_is_not_found() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let college = create_test_college(&service, "du", "Delhi University").await;
    let user = create_test_user(
        &service,
        college.id,
        "arjun",
        "arjun@example.com",
        UserRole::Student,
    )
    .await;

    let err = service
        .groups
        .join(uuid::Uuid::new_v4(), user.id)
        .await
        .expect_err("joining a missing group must fail");
    assert_matches!(err, CampusError::NotFound { .. });

    db.cleanup().await.expect("cleanup");
}
