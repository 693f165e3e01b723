//! Middleware for the session gateway
//!
//! - `auth`: bearer token verification and the `AuthContext` extractor
//! - `cors`: environment-aware CORS configuration

pub mod auth;
pub mod cors;

pub use auth::{AccessTokenVerifier, AuthContext, JwtAuth};
pub use cors::create_cors;
