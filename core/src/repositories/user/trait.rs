//! User repository trait defining the identity lookup used by the token
//! engine and the account flows.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations map storage failures to `DomainError::Internal`.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use sg_core::domain::entities::user::{NewUser, User};
/// use sg_core::errors::DomainError;
/// use sg_core::repositories::UserRepository;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_email(&self, _: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, _: NewUser) -> Result<User, DomainError> { unimplemented!() }
/// #   async fn update(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by durable identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No such user (deleted or never existed)
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError>;

    /// Find a user by email address (exact match on the normalised address)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with its assigned id
    ///
    /// Fails with `AuthError::EmailAlreadyExists` when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;

    /// Replace the stored profile of an existing user
    ///
    /// Fails with `DomainError::NotFound` when no user has `user.id`.
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
