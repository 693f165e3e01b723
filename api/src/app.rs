//! Application factory
//!
//! Builds the actix-web application around an [`AppState`]. Generic over the
//! repositories so the binary can run on MySQL and tests on memory.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::StatusCode,
    web, App, HttpResponse,
};
use sg_core::repositories::{RevocationRepository, UserRepository};
use sg_shared::{error_codes, Environment, HealthResponse};
use tracing_actix_web::TracingLogger;

use crate::config::CorsConfig;
use crate::handlers::error::{error_response, json_error_handler};
use crate::middleware::{
    auth::{AccessTokenVerifier, JwtAuth},
    cors::create_cors,
};
use crate::routes::auth::{
    login::login, logout::logout, me::me, refresh::refresh, register::register, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<R, U>(
    app_state: web::Data<AppState<R, U>>,
    environment: Environment,
    cors_config: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: RevocationRepository + 'static,
    U: UserRepository + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.token_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Last wrap runs first: request span, then CORS
        .wrap(create_cors(environment, cors_config))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(register::<R, U>))
                .route("/login", web::post().to(login::<R, U>))
                .route("/refresh", web::post().to(refresh::<R, U>))
                .service(
                    web::resource("/logout")
                        .wrap(JwtAuth::new())
                        .route(web::post().to(logout::<R, U>)),
                )
                .service(
                    web::resource("/me")
                        .wrap(JwtAuth::new())
                        .route(web::get().to(me)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "sessionguard-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
        error_codes::NOT_FOUND,
    )
}
