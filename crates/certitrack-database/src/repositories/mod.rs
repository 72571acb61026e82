//! Account repository contract and implementations.

pub mod account;
pub mod memory;
pub mod user;

pub use account::AccountRepository;
pub use memory::InMemoryAccountRepository;
pub use user::UserRepository;
