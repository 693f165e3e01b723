//! Domain entities representing core business objects.

pub mod revocation;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use revocation::RevocationEntry;
pub use token::{AccessClaims, AccessToken, Claims, RefreshClaims, TokenPair, TokenType};
pub use user::{NewUser, User};
