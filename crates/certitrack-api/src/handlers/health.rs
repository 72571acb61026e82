//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use certitrack_core::traits::cache::CacheProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// Reports `degraded` with 503 when the revocation cache does not answer,
/// since protected routes reject every request in that state.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let cache_ok = match state.cache.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, backend = state.cache.backend(), "Cache health check failed");
            false
        }
    };

    let (status, label) = if cache_ok {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            service: "certitrack-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            cache: if cache_ok { "connected" } else { "unavailable" }.to_string(),
        }),
    )
}
