//! Application builder: wires router, tower layers and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use certitrack_auth::JwtAuthService;
use certitrack_cache::{CacheManager, RevocationStore};
use certitrack_core::config::AppConfig;
use certitrack_core::error::AppError;
use certitrack_database::DatabasePool;
use certitrack_database::repositories::user::UserRepository;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the CertiTrack server with the given configuration and database pool.
///
/// The revocation cache is mandatory: startup fails if it cannot be reached.
pub async fn run_server(config: AppConfig, db_pool: DatabasePool) -> Result<(), AppError> {
    info!(provider = %config.cache.provider, "Initializing revocation cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    let accounts = Arc::new(UserRepository::new(db_pool.pool().clone()));
    let revocations = RevocationStore::new(Arc::clone(&cache));
    let auth = Arc::new(JwtAuthService::new(&config.auth, accounts, revocations));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, auth, cache);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("CertiTrack server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl+C; shutdown only on process kill");
            std::future::pending::<()>().await;
        }
    }
}
