use actix_web::{web, HttpResponse};
use sg_core::repositories::{RevocationRepository, UserRepository};
use sg_shared::ApiResponse;
use validator::Validate;

use super::AppState;
use crate::dto::auth::{AccessTokenResponse, RefreshTokenRequest};
use crate::handlers::error::{handle_domain_error, validation_failure};

/// Handler for POST /auth/refresh
///
/// Issues a new access token from a valid refresh token. The refresh token
/// itself is not rotated and stays usable until it expires or is revoked.
///
/// # Request Body
///
/// ```json
/// { "refresh_token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: invalid, expired, revoked or wrong-type token, or the
///   user no longer exists
/// - 503 Service Unavailable: revocation store unreachable
pub async fn refresh<R, U>(
    state: web::Data<AppState<R, U>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    R: RevocationRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(&validation_failure(errors));
    }

    match state
        .token_service
        .refresh_access_token(&request.refresh_token)
        .await
    {
        Ok(token) => HttpResponse::Ok().json(ApiResponse::success(
            "Token refreshed",
            AccessTokenResponse::from(token),
        )),
        Err(error) => handle_domain_error(&error),
    }
}
