//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for SessionGuard,
//! following Clean Architecture principles. It provides concrete
//! implementations of the core repository traits and the background
//! maintenance of the revocation list.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool, schema bootstrap and repositories using SQLx
//! - **Tasks**: the periodic sweep of closed revocation windows
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Background tasks
pub mod tasks;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema bootstrap error
    #[error("Schema error: {0}")]
    Schema(String),
}
