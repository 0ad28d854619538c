//! Forum integration tests
//!
//! Counter maintenance and the locked-post rule.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use uuid::Uuid;

use campus_yuva::database::DatabaseService;
use campus_yuva::models::*;
use campus_yuva::CampusError;

async fn setup_post(service: &DatabaseService) -> (College, User, ForumPost) {
    let college = create_test_college(service, "du", "Delhi University").await;
    let author = create_test_user(
        service,
        college.id,
        "arjun",
        "arjun@example.com",
        UserRole::Student,
    )
    .await;
    let post = service
        .forum
        .create_post(CreateForumPostRequest {
            college_id: college.id,
            author_id: author.id,
            group_id: None,
            category: Some("grammar".to_string()),
            title: "Present perfect vs past simple".to_string(),
            content: "When do native speakers actually use the present perfect?".to_string(),
        })
        .await
        .expect("create post");
    (college, author, post)
}

#[tokio::test]
#[serial]
async fn test_reply_increments_replies_count() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let (_, author, post) = setup_post(&service).await;
    assert_eq!(post.replies_count, 0);

    for i in 0..2 {
        service
            .forum
            .create_reply(
                post.id,
                CreateForumReplyRequest {
                    author_id: author.id,
                    content: format!("Reply number {i}"),
                },
            )
            .await
            .expect("reply");
    }

    let post = service
        .forum
        .find_post_by_id(post.id)
        .await
        .expect("find")
        .expect("post exists");
    assert_eq!(post.replies_count, 2);

    let replies = service.forum.list_replies(post.id).await.expect("replies");
    assert_eq!(replies.len(), 2);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_locked_post_rejects_replies() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let (college, author, post) = setup_post(&service).await;
    create_test_user(
        &service,
        college.id,
        "moderator",
        "moderator@example.com",
        UserRole::Moderator,
    )
    .await;

    service
        .moderate_post(
            "moderator@example.com",
            post.id,
            ModerateForumPostRequest {
                is_locked: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("lock post");

    let err = service
        .forum
        .create_reply(
            post.id,
            CreateForumReplyRequest {
                author_id: author.id,
                content: "Too late".to_string(),
            },
        )
        .await
        .expect_err("reply to locked post must fail");
    assert_matches!(err, CampusError::Conflict(_));

    let post = service
        .forum
        .find_post_by_id(post.id)
        .await
        .expect("find")
        .expect("post exists");
    assert_eq!(post.replies_count, 0);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_views_and_likes_count_atomically() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let (_, _, post) = setup_post(&service).await;

    for _ in 0..3 {
        service.forum.view_post(post.id).await.expect("view");
    }
    service.forum.like_post(post.id).await.expect("like");

    let post = service
        .forum
        .find_post_by_id(post.id)
        .await
        .expect("find")
        .expect("post exists");
    assert_eq!(post.views_count, 3);
    assert_eq!(post.likes_count, 1);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_moderation_requires_moderator_role_and_is_audited() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let (college, _, post) = setup_post(&service).await;
    create_test_user(
        &service,
        college.id,
        "admin",
        "admin@example.com",
        UserRole::Admin,
    )
    .await;

    // The author is a plain student, not allowed to moderate.
    let err = service
        .moderate_post(
            "arjun@example.com",
            post.id,
            ModerateForumPostRequest {
                is_sticky: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect_err("student moderation must fail");
    assert_matches!(err, CampusError::Unauthorized(_));

    let moderated = service
        .moderate_post(
            "admin@example.com",
            post.id,
            ModerateForumPostRequest {
                is_sticky: Some(true),
                is_pinned: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("admin moderation");
    assert!(moderated.is_sticky);
    assert!(moderated.is_pinned);
    assert!(!moderated.is_locked);

    let logs = service
        .list_admin_logs("admin@example.com", college.id, 50, 0)
        .await
        .expect("logs");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "moderate_post");

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_reply_to_missing_post_is_not_found() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());

    let (_, author, _) = setup_post(&service).await;

    let err = service
        .forum
        .create_reply(
            Uuid::new_v4(),
            CreateForumReplyRequest {
                author_id: author.id,
                content: "Hello?".to_string(),
            },
        )
        .await
        .expect_err("missing post must be reported");
    assert_matches!(err, CampusError::NotFound { .. });

    db.cleanup().await.expect("cleanup");
}
