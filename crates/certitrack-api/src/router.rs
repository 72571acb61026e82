//! Route definitions for the CertiTrack HTTP API.
//!
//! Everything except `/health` is mounted under `/api/v1`. Each group carries
//! its own authentication middleware as a route layer so unmatched paths
//! still answer 404 rather than 401.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes, without the outer tower layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .merge(optional_routes(&state))
        .merge(admin_routes(&state));

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration, login and refresh need no token.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/change-password", post(handlers::auth::change_password))
        .route("/profile", get(handlers::users::profile))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
}

fn optional_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/session", get(handlers::auth::session))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::optional_auth,
        ))
}

/// The last layer added runs first, so authentication precedes the admin gate.
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users/{id}", get(handlers::users::get_user))
        .route_layer(axum_middleware::from_fn(middleware::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ))
}
