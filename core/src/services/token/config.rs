//! Configuration for the token service

use chrono::{DateTime, Duration, Utc};
use sg_shared::config::auth::{JwtConfig, DEFAULT_JWT_SECRET};

use crate::errors::{DomainError, DomainResult};

/// Configuration for the token service, built once at startup
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in minutes
    pub refresh_token_expiry_minutes: i64,
}

impl TokenServiceConfig {
    /// Access token lifetime, `None` when the minutes overflow a `Duration`
    pub fn access_token_ttl(&self) -> Option<Duration> {
        Duration::try_minutes(self.access_token_expiry_minutes)
    }

    /// Refresh token lifetime, `None` when the minutes overflow a `Duration`
    pub fn refresh_token_ttl(&self) -> Option<Duration> {
        Duration::try_minutes(self.refresh_token_expiry_minutes)
    }

    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

/// Converts a configured number of minutes into a lifetime that is positive
/// and can be added to `now` without overflowing.
pub(crate) fn checked_lifetime(
    label: &str,
    minutes: i64,
    now: DateTime<Utc>,
) -> DomainResult<Duration> {
    Duration::try_minutes(minutes)
        .filter(|lifetime| *lifetime > Duration::zero())
        .filter(|lifetime| now.checked_add_signed(*lifetime).is_some())
        .ok_or_else(|| DomainError::Internal {
            message: format!("{} of {} minutes is out of range", label, minutes),
        })
}

/// `issued_at + lifetime`, as a typed error instead of a panic on overflow
pub(crate) fn expiry_after(
    issued_at: DateTime<Utc>,
    lifetime: Duration,
) -> DomainResult<DateTime<Utc>> {
    issued_at
        .checked_add_signed(lifetime)
        .ok_or_else(|| DomainError::Internal {
            message: format!("Expiry overflows the calendar ({} + {})", issued_at, lifetime),
        })
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_minutes: config.refresh_token_expiry_minutes,
        }
    }
}
