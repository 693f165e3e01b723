//! Authentication and session token configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Secret used when `JWT_SECRET` is not set. Only suitable for local development.
pub const DEFAULT_JWT_SECRET: &str = "default_secret_key_please_change_in_production";

/// Lowest bcrypt cost accepted from the environment
pub const MIN_BCRYPT_COST: u32 = 10;

/// Highest bcrypt cost accepted from the environment
pub const MAX_BCRYPT_COST: u32 = 16;

/// Cost used when `BCRYPT_COST` is unset or out of range
pub const DEFAULT_BCRYPT_COST: u32 = 14;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret used to sign and verify every token
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in minutes
    pub refresh_token_expiry_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry_minutes: 5,
            refresh_token_expiry_minutes: 60,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Load from `JWT_SECRET`, `ACCESS_TOKEN_EXPIRY` and `REFRESH_TOKEN_EXPIRY`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.secret);

        Self {
            secret,
            access_token_expiry_minutes: env_or(
                "ACCESS_TOKEN_EXPIRY",
                defaults.access_token_expiry_minutes,
            ),
            refresh_token_expiry_minutes: env_or(
                "REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_expiry_minutes,
            ),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in minutes
    pub fn with_refresh_expiry_minutes(mut self, minutes: i64) -> Self {
        self.refresh_token_expiry_minutes = minutes;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Revocation windows applied on logout, and the background sweep schedule
///
/// The windows are fixed policy, independent of the token lifetimes above.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// How long a logged-out access token stays on the denylist, in minutes
    pub access_token_minutes: i64,

    /// How long a logged-out refresh token stays on the denylist, in minutes
    pub refresh_token_minutes: i64,

    /// Run the periodic sweep of expired entries
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,

    /// Seconds between two sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            access_token_minutes: 5,
            refresh_token_minutes: 60,
            sweep_enabled: default_sweep_enabled(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl RevocationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_minutes: env_or(
                "ACCESS_TOKEN_REVOCATION_MINUTES",
                defaults.access_token_minutes,
            ),
            refresh_token_minutes: env_or(
                "REFRESH_TOKEN_REVOCATION_MINUTES",
                defaults.refresh_token_minutes,
            ),
            sweep_enabled: env_or("REVOCATION_SWEEP_ENABLED", defaults.sweep_enabled),
            sweep_interval_seconds: env_or(
                "REVOCATION_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordConfig {
    /// Create from `BCRYPT_COST`
    pub fn from_env() -> Self {
        let cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse::<u32>().ok());
        Self {
            bcrypt_cost: Self::sanitize_cost(cost),
        }
    }

    /// Clamp a requested cost to the accepted range, falling back to the default
    pub fn sanitize_cost(cost: Option<u32>) -> u32 {
        match cost {
            Some(c) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&c) => c,
            _ => DEFAULT_BCRYPT_COST,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Logout revocation policy
    #[serde(default)]
    pub revocation: RevocationConfig,

    /// Password hashing
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            revocation: RevocationConfig::from_env(),
            password: PasswordConfig::from_env(),
        }
    }
}

fn default_sweep_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    600
}
