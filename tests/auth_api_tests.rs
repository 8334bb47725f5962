mod common;

use axum::http::StatusCode;
use common::create_test_app;
use rodadex_api::utils::jwt::{generate_token, JwtConfig};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_favorites_require_token() {
    let app = create_test_app();

    let (status, body) = app.get("/api/favorites").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_rejects_invalid_token() {
    let app = create_test_app();

    let (status, _) = app.get_with_token("/api/auth/me", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = create_test_app();
    let other = JwtConfig {
        secret: "someone-else".to_string(),
        expiration: 3600,
    };
    let token = generate_token(Uuid::new_v4(), "a@b.com", &other).unwrap();

    let (status, _) = app.get_with_token("/api/favorites", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_invalid_body() {
    let app = create_test_app();

    let (status, body) = app
        .post_json(
            "/api/auth/register",
            json!({ "name": "T", "email": "not-an-email", "password": "123" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["details"].get("email").is_some());
}

#[tokio::test]
async fn test_login_rejects_empty_password() {
    let app = create_test_app();

    let (status, _) = app
        .post_json("/api/auth/login", json!({ "email": "a@b.com", "password": "" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorite_check_rejects_invalid_team_id() {
    let app = create_test_app();
    let token = generate_token(Uuid::new_v4(), "torcedor@rodadex.com", &app.state.jwt).unwrap();

    let (status, _) = app.get_with_token("/api/favorites/abc/check", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete_with_token("/api/favorites/0", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
