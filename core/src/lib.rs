//! # SessionGuard Core
//!
//! Core business logic and domain layer for SessionGuard.
//! This crate contains the token lifecycle (issuance, validation, refresh,
//! revocation), the logout protocol, the account glue that produces the
//! identities tokens are issued for, repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AccessClaims, AccessToken, Claims, Clock, ManualClock, NewUser, RefreshClaims,
    RevocationEntry, SystemClock, TokenPair, TokenType, User,
};
pub use errors::*;
pub use repositories::{
    InMemoryRevocationRepository, InMemoryUserRepository, RevocationRepository, UserRepository,
};
pub use services::{
    AccountService, LogoutOutcome, LogoutPolicy, LogoutService, LogoutState, PasswordHasher,
    RegisterUser, RevocationService, TokenService, TokenServiceConfig,
};
