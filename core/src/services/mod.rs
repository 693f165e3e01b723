//! Business services containing domain logic and use cases.

pub mod account;
pub mod revocation;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, PasswordHasher, RegisterUser};
pub use revocation::RevocationService;
pub use session::{LogoutOutcome, LogoutPolicy, LogoutService, LogoutState};
pub use token::{TokenService, TokenServiceConfig};
