//! Integration tests for the authentication middleware, the admin gate and
//! the routes that depend on them.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use certitrack_auth::{JwtEncoder, TokenType};
use certitrack_entity::user::UserRole;

use crate::helpers::{TestApp, TestResponse};

/// GET with a verbatim `Authorization` header value.
async fn raw_request(app: &TestApp, path: &str, authorization: &str) -> TestResponse {
    let req = Request::builder()
        .uri(path)
        .header("Authorization", authorization)
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    TestResponse {
        status,
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    }
}

#[tokio::test]
async fn test_missing_and_malformed_headers() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/v1/profile", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error(), "Authorization header is required");

    let scheme = raw_request(&app, "/api/v1/profile", "Basic dXNlcjpwYXNz").await;
    assert_eq!(scheme.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        scheme.error(),
        "Authorization header must start with 'Bearer '"
    );

    let empty = raw_request(&app, "/api/v1/profile", "Bearer ").await;
    assert_eq!(empty.status, StatusCode::UNAUTHORIZED);
    assert_eq!(empty.error(), "Token is required");

    let garbage = app
        .request("GET", "/api/v1/profile", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error(), "Invalid or expired token");
}

#[tokio::test]
async fn test_profile_returns_attached_account() {
    let app = TestApp::new();
    let access = app
        .register("alice@example.com", "Valid123!")
        .await
        .access_token();

    let response = app
        .request("GET", "/api/v1/profile", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Profile retrieved successfully");
    assert_eq!(response.body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_audience_mismatch_is_rejected() {
    let app = TestApp::new();
    let user = app
        .create_user("aud@example.com", "Valid123!", UserRole::User)
        .await;

    let mut foreign = app.config.auth.clone();
    foreign.jwt_audience = "other-client".to_string();
    let token = JwtEncoder::new(&foreign)
        .issue_access_token(&user)
        .unwrap()
        .token;

    let response = app
        .request("GET", "/api/v1/profile", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_access_token_is_rejected() {
    let app = TestApp::new();
    let user = app
        .create_user("late@example.com", "Valid123!", UserRole::User)
        .await;

    let encoder = JwtEncoder::new(&app.config.auth);
    let claims = encoder.claims_for(
        &user,
        TokenType::Access,
        Utc::now() - Duration::minutes(30),
        Duration::minutes(15),
    );
    let token = encoder.sign(&claims).unwrap();

    let response = app
        .request("GET", "/api/v1/profile", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_cannot_authenticate() {
    let app = TestApp::new();
    let refresh = app
        .register("kind@example.com", "Valid123!")
        .await
        .refresh_token();

    let response = app
        .request("GET", "/api/v1/profile", None, Some(&refresh))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_account_loses_access() {
    let app = TestApp::new();
    let registered = app.register("off@example.com", "Valid123!").await;
    let access = registered.access_token();
    let id: Uuid = registered.body["data"]["user"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    app.accounts.set_active(id, false).unwrap();

    let response = app
        .request("GET", "/api/v1/profile", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_probe_never_rejects() {
    let app = TestApp::new();

    let anonymous = app
        .request("GET", "/api/v1/auth/session", None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.body["authenticated"], false);
    assert!(anonymous.body.get("user").is_none());

    let invalid = app
        .request("GET", "/api/v1/auth/session", None, Some("forged"))
        .await;
    assert_eq!(invalid.status, StatusCode::OK);
    assert_eq!(invalid.body["authenticated"], false);

    let access = app
        .register("probe@example.com", "Valid123!")
        .await
        .access_token();
    let signed_in = app
        .request("GET", "/api/v1/auth/session", None, Some(&access))
        .await;
    assert_eq!(signed_in.body["authenticated"], true);
    assert_eq!(signed_in.body["user"]["email"], "probe@example.com");
}

#[tokio::test]
async fn test_admin_gate() {
    let app = TestApp::new();
    let target = app
        .create_user("target@example.com", "Valid123!", UserRole::User)
        .await;
    app.create_user("root@example.com", "Admin123!", UserRole::Admin)
        .await;
    let path = format!("/api/v1/admin/users/{}", target.id);

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let user_token = app
        .login("target@example.com", "Valid123!")
        .await
        .access_token();
    let forbidden = app.request("GET", &path, None, Some(&user_token)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(forbidden.error(), "Admin access required");

    let admin_token = app
        .login("root@example.com", "Admin123!")
        .await
        .access_token();
    let found = app.request("GET", &path, None, Some(&admin_token)).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["message"], "User retrieved successfully");
    assert_eq!(found.body["data"]["email"], "target@example.com");

    let missing = app
        .request(
            "GET",
            &format!("/api/v1/admin/users/{}", Uuid::new_v4()),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_cache_state() {
    let healthy = TestApp::new()
        .request("GET", "/health", None, None)
        .await;
    assert_eq!(healthy.status, StatusCode::OK);
    assert_eq!(healthy.body["status"], "healthy");
    assert_eq!(healthy.body["service"], "certitrack-api");
    assert_eq!(healthy.body["cache"], "connected");

    let degraded = TestApp::with_broken_cache()
        .request("GET", "/health", None, None)
        .await;
    assert_eq!(degraded.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(degraded.body["status"], "degraded");
    assert_eq!(degraded.body["cache"], "unavailable");
}

#[tokio::test]
async fn test_cache_outage_fails_closed() {
    let app = TestApp::with_broken_cache();
    let user = app
        .create_user("outage@example.com", "Valid123!", UserRole::User)
        .await;
    let token = JwtEncoder::new(&app.config.auth)
        .issue_access_token(&user)
        .unwrap()
        .token;

    let response = app
        .request("GET", "/api/v1/profile", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_during_cache_outage_is_internal_error() {
    let app = TestApp::with_broken_cache();
    let user = app
        .create_user("outage2@example.com", "Valid123!", UserRole::User)
        .await;
    let refresh = JwtEncoder::new(&app.config.auth)
        .issue_refresh_token(&user)
        .unwrap()
        .token;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            Some(json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), "Token refresh failed");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/nope", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
