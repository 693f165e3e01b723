pub mod revocation;
pub mod user;

pub use revocation::{InMemoryRevocationRepository, RevocationRepository};
pub use user::{InMemoryUserRepository, UserRepository};
