//! Revocation service: evict-on-write insertion, membership check and sweep

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::revocation::RevocationEntry;
use crate::errors::{DomainResult, ValidationError};
use crate::repositories::RevocationRepository;

/// Service owning the denylist rules shared by every storage backend
pub struct RevocationService<R: RevocationRepository> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: RevocationRepository> RevocationService<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Revokes `token` until `revoke_until`.
    ///
    /// Expired entries are evicted first. A failed eviction is logged and
    /// does not block the insert; a failed insert is returned.
    pub async fn revoke(&self, token: &str, revoke_until: DateTime<Utc>) -> DomainResult<()> {
        if token.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "token".to_string(),
            }
            .into());
        }

        let now = self.clock.now();
        match self.repository.delete_expired(now).await {
            Ok(0) => {}
            Ok(evicted) => debug!(evicted, "Evicted expired revocation entries"),
            Err(e) => warn!(error = %e, "Lazy eviction of revocation entries failed"),
        }

        self.repository
            .upsert(RevocationEntry::new(token, revoke_until))
            .await
    }

    /// True iff an entry exists for `token` whose window has not yet closed
    pub async fn is_revoked(&self, token: &str) -> DomainResult<bool> {
        let entry = self.repository.find(token).await?;
        Ok(entry.is_some_and(|e| e.is_active_at(self.clock.now())))
    }

    /// Deletes every entry with `expires_at <= now`; idempotent
    ///
    /// # Returns
    /// Number of entries removed
    pub async fn sweep(&self) -> DomainResult<usize> {
        let removed = self.repository.delete_expired(self.clock.now()).await?;
        if removed > 0 {
            info!(removed, "Swept expired revocation entries");
        }
        Ok(removed)
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}
