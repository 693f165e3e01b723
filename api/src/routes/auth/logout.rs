use actix_web::{web, HttpRequest, HttpResponse};
use sg_core::repositories::{RevocationRepository, UserRepository};
use sg_shared::ApiResponse;

use super::AppState;
use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::middleware::cors::REFRESH_TOKEN_HEADER;

/// Handler for POST /auth/logout
///
/// Requires a bearer access token. The refresh token, when the client still
/// holds one, travels in the `Refresh-Token` header and is revoked too.
///
/// ## Errors
/// - 401 Unauthorized: missing or rejected access token
/// - 503 Service Unavailable: revocation store unreachable
pub async fn logout<R, U>(
    state: web::Data<AppState<R, U>>,
    auth: AuthContext,
    req: HttpRequest,
) -> HttpResponse
where
    R: RevocationRepository + 'static,
    U: UserRepository + 'static,
{
    let refresh_token = req
        .headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.logout_service.logout(&auth.token, refresh_token).await {
        Ok(outcome) => {
            tracing::info!(user_id = auth.user_id, jti = %auth.jti, "User logged out");
            HttpResponse::Ok().json(ApiResponse::success(
                "Logout successful",
                LogoutResponse {
                    refresh_revoked: outcome.refresh_revoked(),
                },
            ))
        }
        Err(error) => handle_domain_error(&error),
    }
}
