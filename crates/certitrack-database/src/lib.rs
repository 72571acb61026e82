//! # certitrack-database
//!
//! PostgreSQL connection management, migrations, and the account
//! repository: the [`AccountRepository`] contract, its Postgres
//! implementation, and an in-memory implementation for tests.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AccountRepository, InMemoryAccountRepository, UserRepository};
