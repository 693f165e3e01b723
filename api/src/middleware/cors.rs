//! CORS middleware configuration for cross-origin requests.
//!
//! Development allows any origin. Production restricts origins to the
//! configured list and never allows credentials for unknown origins.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use sg_shared::Environment;

use crate::config::CorsConfig;

/// Header carrying the refresh token on `POST /auth/logout`
pub const REFRESH_TOKEN_HEADER: &str = "refresh-token";

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    if environment.is_production() {
        create_production_cors(config)
    } else {
        create_development_cors(config)
    }
}

fn allowed_headers() -> Vec<header::HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::CONTENT_TYPE,
        header::HeaderName::from_static(REFRESH_TOKEN_HEADER),
        header::HeaderName::from_static("x-requested-with"),
    ]
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(allowed_headers())
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age)
        .supports_credentials()
}

fn create_production_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(allowed_headers())
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() {
        tracing::warn!("No ALLOWED_ORIGINS configured; cross-origin requests will be refused");
    }
    for origin in &config.allowed_origins {
        tracing::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
