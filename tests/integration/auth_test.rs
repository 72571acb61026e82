//! Integration tests for the registration, login and token lifecycle flows.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use certitrack_auth::{JwtEncoder, TokenType};
use certitrack_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_then_login_issues_fresh_pair() {
    let app = TestApp::new();

    let registered = app.register("alice@example.com", "Valid123!").await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["message"], "User registered successfully");
    assert!(!registered.access_token().is_empty());
    assert!(!registered.refresh_token().is_empty());

    let user = &registered.body["data"]["user"];
    assert_eq!(user["email"], "alice@example.com");
    assert_eq!(user["role"], "user");
    assert_eq!(user["firstName"], "Alice");
    assert!(user.get("passwordHash").is_none());
    assert!(registered.body["data"]["expiresAt"].is_string());

    let logged_in = app.login("alice@example.com", "Valid123!").await;
    assert_eq!(logged_in.body["message"], "Login successful");
    assert_ne!(logged_in.access_token(), registered.access_token());
    assert_ne!(logged_in.refresh_token(), registered.refresh_token());
    assert!(logged_in.body["data"]["user"]["lastLogin"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("dup@example.com", "Valid123!").await;

    let response = app.register("dup@example.com", "Valid123!").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error(), "User with this email already exists");
    assert_eq!(app.accounts.len().unwrap(), 1);
}

#[tokio::test]
async fn test_register_rejects_weak_password_with_details() {
    let app = TestApp::new();

    let response = app.register("weak@example.com", "alllowercase1").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid request data");
    assert!(response.body["details"]["password"].is_array());
    assert!(app.accounts.is_empty().unwrap());
}

#[tokio::test]
async fn test_register_rejects_invalid_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": "not-an-email",
                "password": "Valid123!",
                "first_name": "A",
                "last_name": "Liddell",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = &response.body["details"];
    assert!(details["email"].is_array());
    assert!(details["first_name"].is_array());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/auth/login", Some(json!({ "email": 42 })), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_does_not_leak_existence() {
    let app = TestApp::new();
    app.register("bob@example.com", "Correct123!").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "bob@example.com", "password": "Wrong123!" })),
            None,
        )
        .await;
    let unknown_account = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": "Wrong123!" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_account.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_account.body);
    assert_eq!(wrong_password.error(), "Invalid email or password");
}

#[tokio::test]
async fn test_inactive_account_cannot_login() {
    let app = TestApp::new();
    let user = app
        .create_user("gone@example.com", "Valid123!", UserRole::User)
        .await;
    app.accounts.set_active(user.id, false).unwrap();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "gone@example.com", "password": "Valid123!" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_and_consumes_token() {
    let app = TestApp::new();
    let registered = app.register("carol@example.com", "Valid123!").await;
    let original = registered.refresh_token();

    let refreshed = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": original })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["message"], "Token refreshed successfully");
    assert_ne!(refreshed.refresh_token(), original);

    let replay = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refreshToken": original })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.error(), "Invalid or expired refresh token");

    let next = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": refreshed.refresh_token() })),
            None,
        )
        .await;
    assert_eq!(next.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_reusable_when_single_use_disabled() {
    let mut config = certitrack_core::config::AppConfig::default();
    config.auth.single_use_refresh_tokens = false;
    let app = TestApp::with_config(config);
    let original = app
        .register("dave@example.com", "Valid123!")
        .await
        .refresh_token();

    let body = json!({ "refresh_token": original });
    let first = app
        .request("POST", "/api/v1/auth/refresh", Some(body.clone()), None)
        .await;
    let second = app
        .request("POST", "/api/v1/auth/refresh", Some(body), None)
        .await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_ne!(first.refresh_token(), second.refresh_token());
}

#[tokio::test]
async fn test_refresh_with_expired_token_is_rejected() {
    let app = TestApp::new();
    let user = app
        .create_user("erin@example.com", "Valid123!", UserRole::User)
        .await;

    let encoder = JwtEncoder::new(&app.config.auth);
    let claims = encoder.claims_for(
        &user,
        TokenType::Refresh,
        Utc::now() - Duration::hours(2),
        Duration::hours(1),
    );
    let expired = encoder.sign(&claims).unwrap();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": expired })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "Invalid or expired refresh token");
}

#[tokio::test]
async fn test_access_token_cannot_refresh() {
    let app = TestApp::new();
    let access = app
        .register("frank@example.com", "Valid123!")
        .await
        .access_token();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": access })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_requires_token_field() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_then_reuse_is_unauthorized() {
    let app = TestApp::new();
    app.register("grace@example.com", "Valid123!").await;
    let session = app.login("grace@example.com", "Valid123!").await;
    let access = session.access_token();
    let refresh = session.refresh_token();

    let profile = app.request("GET", "/api/v1/profile", None, Some(&access)).await;
    assert_eq!(profile.status, StatusCode::OK);

    let logout = app
        .request(
            "POST",
            "/api/v1/auth/logout",
            Some(json!({ "refresh_token": refresh })),
            Some(&access),
        )
        .await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["message"], "Logged out successfully");

    let reuse = app.request("GET", "/api/v1/profile", None, Some(&access)).await;
    assert_eq!(reuse.status, StatusCode::UNAUTHORIZED);

    let refresh_after_logout = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(refresh_after_logout.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_body_revokes_access_token() {
    let app = TestApp::new();
    let access = app
        .register("heidi@example.com", "Valid123!")
        .await
        .access_token();

    let logout = app
        .request("POST", "/api/v1/auth/logout", None, Some(&access))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let reuse = app
        .request("GET", "/api/v1/profile", None, Some(&access))
        .await;
    assert_eq!(reuse.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let access = app
        .register("ivan@example.com", "Valid123!")
        .await
        .access_token();

    let wrong_current = app
        .request(
            "POST",
            "/api/v1/auth/change-password",
            Some(json!({ "currentPassword": "Wrong123!", "newPassword": "Better456!" })),
            Some(&access),
        )
        .await;
    assert_eq!(wrong_current.status, StatusCode::UNAUTHORIZED);

    let unchanged = app
        .request(
            "POST",
            "/api/v1/auth/change-password",
            Some(json!({ "currentPassword": "Valid123!", "newPassword": "Valid123!" })),
            Some(&access),
        )
        .await;
    assert_eq!(unchanged.status, StatusCode::BAD_REQUEST);

    let weak = app
        .request(
            "POST",
            "/api/v1/auth/change-password",
            Some(json!({ "currentPassword": "Valid123!", "newPassword": "weakpassword" })),
            Some(&access),
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let changed = app
        .request(
            "POST",
            "/api/v1/auth/change-password",
            Some(json!({ "currentPassword": "Valid123!", "newPassword": "Better456!" })),
            Some(&access),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);
    assert_eq!(changed.body["message"], "Password changed successfully");

    app.login("ivan@example.com", "Better456!").await;
    let old = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": "ivan@example.com", "password": "Valid123!" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
}
