//! # certitrack-entity
//!
//! Domain entity models for CertiTrack. The only entity owned by the
//! authentication subsystem is the user account; it derives `sqlx::FromRow`
//! so repositories can map rows directly.

pub mod user;
