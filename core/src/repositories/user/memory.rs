//! In-memory implementation of UserRepository for tests and local runs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

#[derive(Debug, Default)]
struct UserTable {
    next_id: u64,
    users: HashMap<u64, User>,
}

/// In-memory user repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `user` under its own id, replacing any existing record
    pub async fn insert(&self, user: User) {
        let mut table = self.table.write().await;
        table.next_id = table.next_id.max(user.id);
        table.users.insert(user.id, user);
    }

    /// Remove a user, returning whether it existed
    pub async fn remove(&self, id: u64) -> bool {
        self.table.write().await.users.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.users.values().any(|u| u.email == new_user.email) {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        table.next_id += 1;
        let user = User::from_new(table.next_id, new_user, Utc::now());
        table.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let Some(stored) = table.users.get_mut(&user.id) else {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        };

        user.created_at = stored.created_at;
        user.updated_at = Utc::now();
        *stored = user.clone();
        Ok(user)
    }
}
