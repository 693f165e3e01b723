//! Authentication route handlers
//!
//! - Registration and login
//! - Access token refresh
//! - Logout
//! - Current user profile

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use sg_core::{
    errors::DomainResult,
    repositories::{RevocationRepository, UserRepository},
    AccountService, Clock, LogoutPolicy, LogoutService, PasswordHasher, SystemClock,
    TokenService, TokenServiceConfig,
};
use sg_shared::AuthConfig;

/// Services shared by every worker
pub struct AppState<R: RevocationRepository, U: UserRepository> {
    pub token_service: Arc<TokenService<R, U>>,
    pub account_service: AccountService<R, U>,
    pub logout_service: LogoutService<R, U>,
}

impl<R: RevocationRepository, U: UserRepository> AppState<R, U> {
    pub fn new(revocations: Arc<R>, users: Arc<U>, config: &AuthConfig) -> DomainResult<Self> {
        Self::with_clock(revocations, users, config, Arc::new(SystemClock))
    }

    /// Builds the services around an explicit clock
    pub fn with_clock(
        revocations: Arc<R>,
        users: Arc<U>,
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
    ) -> DomainResult<Self> {
        let token_service = Arc::new(TokenService::with_clock(
            revocations,
            users.clone(),
            TokenServiceConfig::from(&config.jwt),
            clock,
        )?);
        let account_service = AccountService::new(
            users,
            token_service.clone(),
            PasswordHasher::from_config(&config.password),
        );
        let logout_service = LogoutService::new(
            token_service.clone(),
            LogoutPolicy::try_from(&config.revocation)?,
        );

        Ok(Self {
            token_service,
            account_service,
            logout_service,
        })
    }
}
