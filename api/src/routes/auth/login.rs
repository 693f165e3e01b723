use actix_web::{web, HttpResponse};
use sg_core::repositories::{RevocationRepository, UserRepository};
use sg_shared::ApiResponse;
use validator::Validate;

use super::AppState;
use crate::dto::auth::{LoginRequest, TokenPairResponse};
use crate::handlers::error::{handle_domain_error, validation_failure};

/// Handler for POST /auth/login
///
/// Exchanges email and password for an access/refresh token pair.
///
/// ## Errors
/// - 400 Bad Request: empty email or password
/// - 401 Unauthorized: unknown email or wrong password (indistinguishable)
pub async fn login<R, U>(
    state: web::Data<AppState<R, U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: RevocationRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(&validation_failure(errors));
    }

    match state
        .account_service
        .login(&request.email, &request.password)
        .await
    {
        Ok((_, pair)) => HttpResponse::Ok().json(ApiResponse::success(
            "Login successful",
            TokenPairResponse::from(pair),
        )),
        Err(error) => handle_domain_error(&error),
    }
}
