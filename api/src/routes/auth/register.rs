use actix_web::{web, HttpResponse};
use sg_core::{
    repositories::{RevocationRepository, UserRepository},
    RegisterUser,
};
use sg_shared::ApiResponse;
use validator::Validate;

use super::AppState;
use crate::dto::auth::{RegisterRequest, UserProfileResponse};
use crate::handlers::error::{handle_domain_error, validation_failure};

/// Handler for POST /auth/register
///
/// Creates an account and answers 201 with the public profile.
///
/// ## Errors
/// - 400 Bad Request: missing fields, malformed email, weak or mismatched password
/// - 409 Conflict: email already registered
pub async fn register<R, U>(
    state: web::Data<AppState<R, U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    R: RevocationRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_domain_error(&validation_failure(errors));
    }

    let request = request.into_inner();
    let input = RegisterUser {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        password: request.password,
        confirm_password: request.confirm_password,
    };

    match state.account_service.register(input).await {
        Ok(user) => HttpResponse::Created().json(ApiResponse::success(
            "Registration successful",
            UserProfileResponse::from(user),
        )),
        Err(error) => handle_domain_error(&error),
    }
}
