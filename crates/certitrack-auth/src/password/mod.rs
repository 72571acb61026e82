//! Password hashing and strength policy.

pub mod hasher;
pub mod policy;

pub use hasher::{PLACEHOLDER_HASH, PasswordHasher};
pub use policy::PasswordPolicy;
