//! MySQL implementation of the RevocationRepository trait.
//!
//! Rows are keyed by the SHA-256 hex digest of the token so the table never
//! holds a live bearer credential.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{MySqlPool, Row};

use sg_core::domain::entities::revocation::RevocationEntry;
use sg_core::errors::{DomainError, TokenError};
use sg_core::repositories::RevocationRepository;

/// MySQL implementation of RevocationRepository
pub struct MySqlRevocationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Hash a token value using SHA-256
    ///
    /// # Returns
    /// Lowercase hexadecimal digest, 64 characters
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn store_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("Revocation store failed to {}: {}", action, e);
    TokenError::StoreUnavailable {
        message: format!("Failed to {}: {}", action, e),
    }
    .into()
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn upsert(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO revoked_tokens (token_hash, expires_at, created_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(Self::hash_token(&entry.token))
            .bind(entry.expires_at)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("revoke token", e))?;

        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RevocationEntry>, DomainError> {
        let query = r#"
            SELECT expires_at
            FROM revoked_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(Self::hash_token(token))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("look up revoked token", e))?;

        match row {
            Some(row) => {
                let expires_at: DateTime<Utc> = row
                    .try_get("expires_at")
                    .map_err(|e| store_error("read expires_at", e))?;
                Ok(Some(RevocationEntry::new(token, expires_at)))
            }
            None => Ok(None),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("delete expired revocations", e))?;

        Ok(result.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_hex_sha256() {
        let hash = MySqlRevocationRepository::hash_token("abc");

        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, MySqlRevocationRepository::hash_token("abd"));
    }
}
