//! # certitrack-auth
//!
//! Authentication and token lifecycle for CertiTrack.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the password strength policy
//! - `jwt`: access/refresh token claims, signing, and validation
//! - `service`: the [`AuthService`] contract and its JWT-backed implementation
//! - `error`: the authentication error taxonomy

pub mod error;
pub mod jwt;
pub mod password;
pub mod service;

pub use error::AuthError;
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenType};
pub use password::{PasswordHasher, PasswordPolicy};
pub use service::{AuthResult, AuthService, JwtAuthService, RegisterInput};
