//! HTTP surface integration tests
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`: status
//! codes, the mandatory tenant filter, and the actor header on privileged
//! routes.

mod helpers;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use helpers::*;
use http_body_util::BodyExt;
use serial_test::serial;
use tower::ServiceExt;

use campus_yuva::api::{build_router, AppState};
use campus_yuva::database::DatabaseService;
use campus_yuva::models::*;

fn app(db: &TestDatabase) -> Router {
    build_router(AppState::new(db.pool.clone()))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
#[serial]
async fn test_health_endpoint() {
    let db = TestDatabase::new().await.expect("test database");
    let app = app(&db);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_create_college_returns_201() {
    let db = TestDatabase::new().await.expect("test database");
    let app = app(&db);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/colleges")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "domain": "du",
                        "name": "Delhi University"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["domain"], "du");
    assert!(body["id"].is_string());

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_user_list_requires_college_id() {
    let db = TestDatabase::new().await.expect("test database");
    let app = app(&db);

    let response = app
        .oneshot(Request::builder().uri("/api/users").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_user_list_is_tenant_scoped() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());
    let app = app(&db);

    let du = create_test_college(&service, "du", "Delhi University").await;
    let mu = create_test_college(&service, "mu", "Mumbai University").await;
    create_test_user(&service, du.id, "arjun", "arjun@example.com", UserRole::Student).await;
    create_test_user(&service, mu.id, "priya", "priya@example.com", UserRole::Student).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users?college_id={}", du.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body.as_array().expect("array body");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "arjun");

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_privileged_route_requires_actor_header() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());
    let app = app(&db);

    let college = create_test_college(&service, "du", "Delhi University").await;
    let user =
        create_test_user(&service, college.id, "arjun", "arjun@example.com", UserRole::Student)
            .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/users/{}/cefr", user.id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "cefr_level": "B2" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_cefr_assignment_end_to_end() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());
    let app = app(&db);

    let college = create_test_college(&service, "du", "Delhi University").await;
    create_test_user(
        &service,
        college.id,
        "trainer",
        "trainer@example.com",
        UserRole::MasterTrainer,
    )
    .await;
    let student =
        create_test_user(&service, college.id, "arjun", "arjun@example.com", UserRole::Student)
            .await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/users/{}/cefr", student.id))
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-actor-email", "trainer@example.com")
                .body(Body::from(
                    serde_json::json!({ "cefr_level": "B2" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["cefr_level"], "B2");

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_identity_lookup() {
    let db = TestDatabase::new().await.expect("test database");
    let service = DatabaseService::new(db.pool.clone());
    let app = app(&db);

    let college = create_test_college(&service, "du", "Delhi University").await;
    create_test_user(&service, college.id, "arjun", "arjun@example.com", UserRole::Student).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/lookup?email=arjun@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["role"], "student");
    assert_eq!(body["college_id"], college.id.to_string());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/lookup?email=nobody@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    db.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn test_unknown_resource_is_404() {
    let db = TestDatabase::new().await.expect("test database");
    let app = app(&db);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/colleges/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    db.cleanup().await.expect("cleanup");
}
