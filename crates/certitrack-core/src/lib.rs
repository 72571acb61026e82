//! # certitrack-core
//!
//! Core crate for the CertiTrack backend. Contains configuration schemas,
//! the cache backend trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other CertiTrack crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
