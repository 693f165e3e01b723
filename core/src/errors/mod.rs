//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Token failure carried by this error, if any
    pub fn as_token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the caller should be treated as unauthenticated
    pub fn is_unauthenticated(&self) -> bool {
        match self {
            DomainError::Token(err) => err.is_rejection(),
            DomainError::Auth(AuthError::InvalidCredentials) => true,
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridged_errors_keep_their_message() {
        let err: DomainError = TokenError::Revoked.into();
        assert_eq!(err.to_string(), "Token revoked");
        assert!(matches!(err.as_token_error(), Some(TokenError::Revoked)));

        let err: DomainError = AuthError::EmailAlreadyExists.into();
        assert_eq!(err.to_string(), "Email already exists");
        assert!(err.as_token_error().is_none());
    }

    #[test]
    fn test_unauthenticated_classification() {
        let rejected: DomainError = TokenError::Expired.into();
        assert!(rejected.is_unauthenticated());

        let credentials: DomainError = AuthError::InvalidCredentials.into();
        assert!(credentials.is_unauthenticated());

        let store: DomainError = TokenError::StoreUnavailable {
            message: "connection refused".to_string(),
        }
        .into();
        assert!(!store.is_unauthenticated());

        let internal = DomainError::Internal {
            message: "boom".to_string(),
        };
        assert!(!internal.is_unauthenticated());
    }
}
