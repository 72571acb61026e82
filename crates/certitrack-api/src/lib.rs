//! # certitrack-api
//!
//! HTTP API layer for CertiTrack built on Axum.
//!
//! Provides the authentication endpoints, the request-authentication
//! middleware (required, optional, and admin gate), extractors, DTOs, request
//! validation, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod validation;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
pub use validation::ValidatorRegistry;
