//! Session gateway: the HTTP surface over the SessionGuard token engine.
//!
//! Exposed as a library so integration tests can build the app in-process.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use config::{Config, CorsConfig};
pub use routes::auth::AppState;
