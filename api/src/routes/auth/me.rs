use actix_web::HttpResponse;
use sg_shared::ApiResponse;

use crate::dto::auth::UserProfileResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /auth/me
///
/// Answers from the access token claims without touching the user store.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        "Current user",
        UserProfileResponse::from(&auth),
    ))
}
