mod common;

use std::sync::Arc;

use auth::IdentityClaims;
use auth::Role;
use auth::TokenIssuer;
use axum::http::StatusCode;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({
                "username": "nicola",
                "email": "nicola@example.com",
                "password": "pass_word!"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["role"], "User");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["password_hash"].is_null());
}

#[tokio::test]
async fn test_register_stores_salted_secret() {
    let app = TestApp::new();

    let user_id = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let secret = app.repository.stored_secret(&user_id).unwrap();
    assert_ne!(secret.as_str(), "pass_word!");
    assert_eq!(secret.as_str().len(), 64);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({
                "username": "nicola2",
                "email": "nicola@example.com",
                "password": "pass_word!2"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let (status, _) = app
        .post(
            "/api/auth/register",
            json!({
                "username": "nicola",
                "email": "other@example.com",
                "password": "pass_word!"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_invalid_input() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/register",
            json!({
                "username": "n",
                "email": "nicola@example.com",
                "password": "pass_word"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));

    let (status, _) = app
        .post(
            "/api/auth/register",
            json!({
                "username": "nicola",
                "email": "not-an-email",
                "password": "pass_word"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app
        .post(
            "/api/auth/register",
            json!({
                "username": "nicola",
                "email": "nicola@example.com",
                "password": "short"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success_returns_valid_token() {
    let app = TestApp::new();
    let user_id = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "nicola@example.com", "password": "pass_word!" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["id"], user_id.to_string());
    assert!(body["data"]["expires_at"].is_string());

    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_alike() {
    let app = TestApp::new();
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let (wrong_password_status, wrong_password_body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "nicola@example.com", "password": "wrong_password" }),
        )
        .await;
    let (unknown_email_status, unknown_email_body) = app
        .post(
            "/api/auth/login",
            json!({ "email": "nobody@example.com", "password": "pass_word!" }),
        )
        .await;

    assert_eq!(wrong_password_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password_body, unknown_email_body);
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/auth/profile", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status_code"], 401);
}

#[tokio::test]
async fn test_profile_rejects_invalid_token() {
    let app = TestApp::new();

    let (status, _) = app
        .get("/api/auth/profile", Some("invalid.token.here"))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_rejects_expired_token() {
    let app = TestApp::new();
    let user_id = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let issuer = TokenIssuer::new(Arc::clone(&app.signing_config));
    let identity = IdentityClaims::new(user_id, "nicola", "nicola@example.com", Role::User);
    let expired = issuer
        .issue_at(&identity, Utc::now() - Duration::hours(2))
        .unwrap();

    let (status, _) = app
        .get("/api/auth/profile", Some(&expired.access_token))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_view_and_update() {
    let app = TestApp::new();
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;
    let token = app.login("nicola@example.com", "pass_word!").await;

    let (status, body) = app.get("/api/auth/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["phone_number"], "");
    assert!(body["data"]["date_of_birth"].is_null());

    let (status, body) = app
        .put(
            "/api/auth/profile",
            &token,
            json!({
                "address": {
                    "street": "Via Roma 1",
                    "city": "Milano",
                    "postal_code": "20100",
                    "country": "IT"
                },
                "phone_number": "+39 02 1234567",
                "date_of_birth": "1990-05-17",
                "bio": "Sneaker collector"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["address"]["city"], "Milano");

    let (status, body) = app.get("/api/auth/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phone_number"], "+39 02 1234567");
    assert_eq!(body["data"]["date_of_birth"], "1990-05-17");
    assert_eq!(body["data"]["bio"], "Sneaker collector");
}

#[tokio::test]
async fn test_profile_update_rejects_invalid_phone_number() {
    let app = TestApp::new();
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;
    let token = app.login("nicola@example.com", "pass_word!").await;

    let (status, _) = app
        .put(
            "/api/auth/profile",
            &token,
            json!({
                "address": {
                    "street": "",
                    "city": "",
                    "postal_code": "",
                    "country": ""
                },
                "phone_number": "call me maybe",
                "date_of_birth": "1990-05-17",
                "bio": null
            }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;
    let token = app.login("nicola@example.com", "pass_word!").await;

    let (status, _) = app
        .put(
            "/api/auth/password",
            &token,
            json!({ "old_password": "not_my_password", "new_password": "new_pass_word" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .put(
            "/api/auth/password",
            &token,
            json!({ "old_password": "pass_word!", "new_password": "new_pass_word" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/auth/login",
            json!({ "email": "nicola@example.com", "password": "pass_word!" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.login("nicola@example.com", "new_pass_word").await;
}

#[tokio::test]
async fn test_role_echoes_token_role() {
    let app = TestApp::new();
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;
    let token = app.login("nicola@example.com", "pass_word!").await;

    let (status, body) = app.get("/api/auth/role", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "User");
}

#[tokio::test]
async fn test_admin_route_forbidden_for_user() {
    let app = TestApp::new();
    let user_id = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;
    let token = app.login("nicola@example.com", "pass_word!").await;

    let (status, body) = app
        .get(&format!("/api/users/{}", user_id), Some(&token))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status_code"], 403);
}

#[tokio::test]
async fn test_admin_route_without_token_is_unauthorized() {
    let app = TestApp::new();
    let user_id = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let (status, _) = app.get(&format!("/api/users/{}", user_id), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_can_look_up_users() {
    let app = TestApp::new();
    let admin_id = app.register("admin", "admin@example.com", "admin_pass").await;
    app.repository.set_role(&admin_id, Role::Admin);
    let user_id = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let token = app.login("admin@example.com", "admin_pass").await;

    let (status, body) = app.get("/api/auth/role", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Admin");

    let (status, body) = app
        .get(&format!("/api/users/{}", user_id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["role"], "User");

    let (status, _) = app
        .get(
            &format!("/api/users/{}", uuid::Uuid::new_v4()),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/users/not-a-uuid", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_token_passes_authenticated_routes() {
    let app = TestApp::new();
    let admin_id = app.register("admin", "admin@example.com", "admin_pass").await;
    app.repository.set_role(&admin_id, Role::Admin);
    let token = app.login("admin@example.com", "admin_pass").await;

    let (status, _) = app.get("/api/auth/profile", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
}
