//! In-memory implementation of RevocationRepository for tests and local runs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::revocation::RevocationEntry;
use crate::errors::DomainError;

use super::r#trait::RevocationRepository;

/// In-memory revocation list keyed by token string
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationRepository {
    entries: Arc<RwLock<HashMap<String, RevocationEntry>>>,
}

impl InMemoryRevocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RevocationRepository for InMemoryRevocationRepository {
    async fn upsert(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.token.clone(), entry);
        Ok(())
    }

    async fn find(&self, token: &str) -> Result<Option<RevocationEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(token).cloned())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before - entries.len())
    }
}
