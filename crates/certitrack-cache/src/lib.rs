//! # certitrack-cache
//!
//! Cache provider implementations for CertiTrack and the token revocation
//! store built on top of them.
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;
pub mod revocation;

pub use provider::CacheManager;
pub use revocation::RevocationStore;
