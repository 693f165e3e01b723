//! Revocation repository trait: durable storage for the token denylist.
//!
//! Storage only. The eviction policy (evict-on-write, `expires_at <= now`
//! is dead) lives in `RevocationService` so every backend behaves the same.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::revocation::RevocationEntry;
use crate::errors::DomainError;

/// Repository trait for revocation entries keyed by token string
///
/// Storage failures must surface as `TokenError::StoreUnavailable`; they are
/// never reported as "not revoked".
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Insert an entry, replacing the expiry of an existing one for the
    /// same token (last write wins)
    async fn upsert(&self, entry: RevocationEntry) -> Result<(), DomainError>;

    /// Look up the entry for `token`, expired or not
    async fn find(&self, token: &str) -> Result<Option<RevocationEntry>, DomainError>;

    /// Delete every entry with `expires_at <= now`
    ///
    /// # Returns
    /// Number of entries removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
