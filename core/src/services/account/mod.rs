//! Account glue: registration and password login.

mod password;
mod service;

pub use password::PasswordHasher;
pub use service::{AccountService, RegisterUser};
