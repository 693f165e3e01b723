//! Mapping from domain errors to HTTP responses
//!
//! Every failure leaving the gateway goes through [`handle_domain_error`], so
//! status codes and error codes are decided in one place.

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use sg_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use sg_shared::{error_codes, ApiResponse};

/// Status code and machine-readable code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Token(token_error) => classify_token_error(token_error),
        DomainError::Auth(AuthError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS)
        }
        DomainError::Auth(AuthError::EmailAlreadyExists) => {
            (StatusCode::CONFLICT, error_codes::EMAIL_ALREADY_EXISTS)
        }
        DomainError::Auth(AuthError::PasswordMismatch | AuthError::WeakPassword)
        | DomainError::ValidationErr(_)
        | DomainError::Validation { .. } => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

fn classify_token_error(error: &TokenError) -> (StatusCode, &'static str) {
    match error {
        TokenError::MalformedOrForged => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_MALFORMED),
        TokenError::Expired => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED),
        TokenError::Revoked => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_REVOKED),
        TokenError::WrongTokenType { .. } => {
            (StatusCode::UNAUTHORIZED, error_codes::TOKEN_WRONG_TYPE)
        }
        TokenError::MalformedClaims => {
            (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID_CLAIMS)
        }
        TokenError::IdentityNotFound => {
            (StatusCode::UNAUTHORIZED, error_codes::IDENTITY_NOT_FOUND)
        }
        TokenError::StoreUnavailable { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, error_codes::SERVICE_UNAVAILABLE)
        }
        TokenError::SigningFailed => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Converts a domain error into the JSON error envelope
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    // Server-side detail stays in the logs
    let message = if status.is_server_error() {
        tracing::error!(error = %error, code, "Request failed");
        match status {
            StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable".to_string(),
            _ => "Internal server error".to_string(),
        }
    } else {
        tracing::debug!(error = %error, code, "Request rejected");
        error.to_string()
    };

    error_response(status, message, code)
}

/// Builds the JSON error envelope with an explicit status
pub fn error_response(status: StatusCode, message: impl Into<String>, code: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()>::error(message, Some(code.to_string())))
}

/// Error handler for `web::JsonConfig`: malformed bodies answer 400 in the
/// same envelope as every other failure
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    let response = error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid request body: {}", err),
        error_codes::BAD_REQUEST,
    );
    actix_web::error::InternalError::from_response(err, response).into()
}

/// Maps `validator` failures on a DTO to a domain validation error
pub fn validation_failure(errors: validator::ValidationErrors) -> DomainError {
    let field = errors
        .field_errors()
        .keys()
        .next()
        .map(|field| field.to_string())
        .unwrap_or_else(|| "request".to_string());
    ValidationError::InvalidFormat { field }.into()
}
