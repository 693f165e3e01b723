//! Domain-specific error types for authentication and token operations.
//!
//! The presentation layer maps each variant to a status code and a stable
//! error code; messages here are for logs and response bodies.

use thiserror::Error;

/// Account-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 8 characters and contain uppercase, lowercase, number and special character")]
    WeakPassword,
}

/// Token lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Unparseable token or signature mismatch
    #[error("Invalid token")]
    MalformedOrForged,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Invalid token type: expected {expected}, got {actual}")]
    WrongTokenType { expected: String, actual: String },

    /// Signed payload that fits neither claim shape
    #[error("Invalid token claims")]
    MalformedClaims,

    #[error("User not found")]
    IdentityNotFound,

    #[error("Revocation store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Token signing failed")]
    SigningFailed,
}

impl TokenError {
    /// Failures that mean "the presented token is not acceptable",
    /// as opposed to the service being unable to decide
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            TokenError::StoreUnavailable { .. } | TokenError::SigningFailed
        )
    }
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email format")]
    InvalidEmail,
}
