//! Core traits defined in `certitrack-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
