//! MySQL repository implementations

mod revocation_repository_impl;
mod user_repository_impl;

pub use revocation_repository_impl::MySqlRevocationRepository;
pub use user_repository_impl::MySqlUserRepository;
