//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use certitrack_api::{AppState, build_app};
use certitrack_auth::{JwtAuthService, PasswordHasher};
use certitrack_cache::memory::MemoryCacheProvider;
use certitrack_cache::{CacheManager, RevocationStore};
use certitrack_core::config::AppConfig;
use certitrack_core::error::AppError;
use certitrack_core::result::AppResult;
use certitrack_core::traits::cache::CacheProvider;
use certitrack_database::{AccountRepository, InMemoryAccountRepository};
use certitrack_entity::user::{NewUser, User, UserRole};

/// Test application context
pub struct TestApp {
    /// The full application, layers included
    pub router: Router,
    /// Account store behind the service
    pub accounts: Arc<InMemoryAccountRepository>,
    /// Configuration the app was built with
    pub config: AppConfig,
}

impl TestApp {
    /// App backed by the in-memory cache.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// App backed by the in-memory cache with a tweaked configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, Arc::new(MemoryCacheProvider::default()))
    }

    /// App whose revocation cache fails every call.
    pub fn with_broken_cache() -> Self {
        Self::build(AppConfig::default(), Arc::new(BrokenCache))
    }

    fn build(config: AppConfig, provider: Arc<dyn CacheProvider>) -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let cache = Arc::new(CacheManager::from_provider(provider));
        let auth = Arc::new(JwtAuthService::new(
            &config.auth,
            Arc::clone(&accounts) as Arc<dyn AccountRepository>,
            RevocationStore::new(Arc::clone(&cache)),
        ));
        let router = build_app(AppState::new(config.clone(), auth, cache));

        Self {
            router,
            accounts,
            config,
        }
    }

    /// Store an account directly, bypassing registration.
    pub async fn create_user(&self, email: &str, password: &str, role: UserRole) -> User {
        let password_hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");
        self.accounts
            .create_user(&NewUser {
                email: email.to_string(),
                password_hash,
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                phone: None,
                role,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Register through the API and return the response.
    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({
                "email": email,
                "password": password,
                "firstName": "Alice",
                "lastName": "Liddell",
            })),
            None,
        )
        .await
    }

    /// Log in and return the response, asserting success.
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        let response = self
            .request(
                "POST",
                "/api/v1/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `data.access-token` of a token-issuing response.
    pub fn access_token(&self) -> String {
        self.token_field("access-token")
    }

    /// `data.refresh-token` of a token-issuing response.
    pub fn refresh_token(&self) -> String {
        self.token_field("refresh-token")
    }

    /// Top-level `error` message.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    fn token_field(&self, field: &str) -> String {
        self.body["data"][field]
            .as_str()
            .unwrap_or_else(|| panic!("No {field} in response: {:?}", self.body))
            .to_string()
    }
}

/// Cache backend that is always unreachable.
#[derive(Debug)]
pub struct BrokenCache;

#[async_trait]
impl CacheProvider for BrokenCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::cache("connection refused"))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Err(AppError::cache("connection refused"))
    }

    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<bool> {
        Err(AppError::cache("connection refused"))
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Err(AppError::cache("connection refused"))
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Err(AppError::cache("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Err(AppError::cache("connection refused"))
    }
}
