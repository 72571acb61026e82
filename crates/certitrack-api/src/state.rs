//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use certitrack_auth::AuthService;
use certitrack_cache::CacheManager;
use certitrack_core::config::AppConfig;

use crate::validation::ValidatorRegistry;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Request body validation rules
    pub validators: Arc<ValidatorRegistry>,
    /// Revocation cache, probed by the health endpoint
    pub cache: Arc<CacheManager>,
}

impl AppState {
    /// Assemble state with the default validation rules for `config`.
    pub fn new(config: AppConfig, auth: Arc<dyn AuthService>, cache: Arc<CacheManager>) -> Self {
        let validators = Arc::new(ValidatorRegistry::with_defaults(&config.auth));
        Self {
            config: Arc::new(config),
            auth,
            validators,
            cache,
        }
    }
}
