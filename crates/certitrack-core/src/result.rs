//! Convenience result type alias for CertiTrack.

use crate::error::AppError;

/// A specialized `Result` type for infrastructure operations.
pub type AppResult<T> = Result<T, AppError>;
