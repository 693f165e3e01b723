//! bcrypt password hashing

use sg_shared::config::PasswordConfig;
use tracing::error;

use crate::errors::{DomainError, DomainResult};

/// Hashes and verifies passwords with bcrypt.
///
/// bcrypt is CPU bound, so both operations run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Uses `cost` as given; bcrypt itself rejects values outside 4..=31
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Uses the clamped cost from configuration
    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(PasswordConfig::sanitize_cost(Some(config.bcrypt_cost)))
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                DomainError::Internal {
                    message: format!("Failed to hash password: {}", e),
                }
            })
    }

    /// False for a mismatch and for a digest bcrypt cannot parse
    pub async fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::from_config(&PasswordConfig::default())
    }
}
