//! Logout protocol: revoke the access token, then the refresh token.
//!
//! ```text
//! Start --revoke access--> AccessRevoked --revoke refresh--> BothRevoked
//!   |                           |
//!   +---------> Failed <--------+
//! ```
//!
//! The protocol is not resumable. Any failed revoke aborts the logout and is
//! returned to the caller; no partial success is reported as success.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sg_shared::config::RevocationConfig;
use tracing::{error, info, warn};

use crate::domain::clock::Clock;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{RevocationRepository, UserRepository};
use crate::services::token::{checked_lifetime, expiry_after, TokenService};

/// How long each kind of token stays revoked after logout.
///
/// Both windows are positive; a zero window would report a logout that
/// revokes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutPolicy {
    access_token_window: Duration,
    refresh_token_window: Duration,
}

impl LogoutPolicy {
    pub fn new(
        access_token_window: Duration,
        refresh_token_window: Duration,
    ) -> DomainResult<Self> {
        for (label, window) in [
            ("Access token", access_token_window),
            ("Refresh token", refresh_token_window),
        ] {
            if window <= Duration::zero() {
                return Err(DomainError::Internal {
                    message: format!(
                        "{} revocation window must be positive, got {}",
                        label, window
                    ),
                });
            }
        }

        Ok(Self {
            access_token_window,
            refresh_token_window,
        })
    }

    pub fn access_token_window(&self) -> Duration {
        self.access_token_window
    }

    pub fn refresh_token_window(&self) -> Duration {
        self.refresh_token_window
    }
}

impl Default for LogoutPolicy {
    fn default() -> Self {
        Self {
            access_token_window: Duration::minutes(5),
            refresh_token_window: Duration::minutes(60),
        }
    }
}

impl TryFrom<&RevocationConfig> for LogoutPolicy {
    type Error = DomainError;

    fn try_from(config: &RevocationConfig) -> DomainResult<Self> {
        let now = Utc::now();
        Self::new(
            checked_lifetime(
                "Access token revocation window",
                config.access_token_minutes,
                now,
            )?,
            checked_lifetime(
                "Refresh token revocation window",
                config.refresh_token_minutes,
                now,
            )?,
        )
    }
}

/// Progress of a single logout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutState {
    Start,
    AccessRevoked,
    BothRevoked,
    Failed,
}

/// Result of a completed logout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutOutcome {
    /// `AccessRevoked` when no refresh token was presented, else `BothRevoked`
    pub state: LogoutState,
    pub access_revoked_until: DateTime<Utc>,
    /// `None` when the refresh step was skipped
    pub refresh_revoked_until: Option<DateTime<Utc>>,
}

impl LogoutOutcome {
    pub fn refresh_revoked(&self) -> bool {
        self.refresh_revoked_until.is_some()
    }
}

/// Service running the logout protocol against the token service
pub struct LogoutService<R: RevocationRepository, U: UserRepository> {
    tokens: Arc<TokenService<R, U>>,
    policy: LogoutPolicy,
}

impl<R: RevocationRepository, U: UserRepository> LogoutService<R, U> {
    pub fn new(tokens: Arc<TokenService<R, U>>, policy: LogoutPolicy) -> Self {
        Self { tokens, policy }
    }

    /// Revokes `access_token` and, when present, `refresh_token`.
    ///
    /// A missing or blank refresh token is skipped rather than written to
    /// the revocation list.
    pub async fn logout(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> DomainResult<LogoutOutcome> {
        if access_token.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "access_token".to_string(),
            }
            .into());
        }

        let mut state = LogoutState::Start;
        let now = self.tokens.clock().now();

        let access_revoked_until = expiry_after(now, self.policy.access_token_window)
            .map_err(|e| fail(&mut state, "access", e))?;
        self.tokens
            .revoke_token(access_token, access_revoked_until)
            .await
            .map_err(|e| fail(&mut state, "access", e))?;
        state = LogoutState::AccessRevoked;

        let Some(refresh_token) = refresh_token.map(str::trim).filter(|t| !t.is_empty()) else {
            warn!("Logout without a refresh token; refresh revocation skipped");
            return Ok(LogoutOutcome {
                state,
                access_revoked_until,
                refresh_revoked_until: None,
            });
        };

        let refresh_revoked_until = expiry_after(now, self.policy.refresh_token_window)
            .map_err(|e| fail(&mut state, "refresh", e))?;
        self.tokens
            .revoke_token(refresh_token, refresh_revoked_until)
            .await
            .map_err(|e| fail(&mut state, "refresh", e))?;
        state = LogoutState::BothRevoked;

        info!(
            access_revoked_until = %access_revoked_until,
            refresh_revoked_until = %refresh_revoked_until,
            "Revoked access and refresh tokens"
        );
        Ok(LogoutOutcome {
            state,
            access_revoked_until,
            refresh_revoked_until: Some(refresh_revoked_until),
        })
    }

    pub fn policy(&self) -> &LogoutPolicy {
        &self.policy
    }
}

fn fail(state: &mut LogoutState, step: &str, err: DomainError) -> DomainError {
    error!(from = ?state, step, error = %err, "Logout failed");
    *state = LogoutState::Failed;
    err
}
