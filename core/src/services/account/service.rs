//! Account service: registration and email/password login

use std::sync::Arc;

use sg_shared::utils::validation::{is_strong_password, is_valid_email, not_blank};
use tracing::{debug, info};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::{RevocationRepository, UserRepository};
use crate::services::token::TokenService;

use super::password::PasswordHasher;

/// Registration input as received from the client
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Service creating accounts and exchanging credentials for a token pair
pub struct AccountService<R: RevocationRepository, U: UserRepository> {
    users: Arc<U>,
    tokens: Arc<TokenService<R, U>>,
    hasher: PasswordHasher,
}

impl<R: RevocationRepository, U: UserRepository> AccountService<R, U> {
    pub fn new(users: Arc<U>, tokens: Arc<TokenService<R, U>>, hasher: PasswordHasher) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - blank name, blank or malformed email
    /// * `AuthError::WeakPassword` / `AuthError::PasswordMismatch`
    /// * `AuthError::EmailAlreadyExists`
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        let first_name = required("first_name", &input.first_name)?;
        let last_name = required("last_name", &input.last_name)?;
        let email = normalize_email(&required("email", &input.email)?);

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_strong_password(&input.password) {
            return Err(AuthError::WeakPassword.into());
        }
        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }

        if self.users.find_by_email(&email).await?.is_some() {
            debug!("Registration rejected: email already exists");
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password_hash = self.hasher.hash(&input.password).await?;
        let user = self
            .users
            .create(NewUser {
                first_name,
                last_name,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "Registered user");
        Ok(user)
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// An unknown email and a wrong password fail identically with
    /// `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.hasher.verify(password, &user.password_hash).await {
            debug!(user_id = user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = self.tokens.issue_token_pair(&user)?;
        info!(user_id = user.id, "User logged in");
        Ok((user, pair))
    }
}

fn required(field: &str, value: &str) -> DomainResult<String> {
    if !not_blank(value) {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    Ok(value.trim().to_string())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
