//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 access and refresh token issuance
//! - Validation against signature, claim shape, revocation list and expiry
//! - The refresh exchange
//! - Revocation and sweeping of the revocation list

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub(crate) use config::{checked_lifetime, expiry_after};
pub use service::TokenService;
