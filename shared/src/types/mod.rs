//! Type definitions shared by the HTTP layer
//!
//! - `response` - the JSON envelope and health check body

pub mod response;

pub use response::{ApiResponse, HealthResponse};
