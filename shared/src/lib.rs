//! Shared utilities and common types for the SessionGuard server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error codes and response envelopes
//! - Validation helpers (email format, password strength)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    PasswordConfig, RevocationConfig, ServerConfig, StorageBackend,
};
pub use errors::error_codes;
pub use types::{ApiResponse, HealthResponse};
pub use utils::validation;
