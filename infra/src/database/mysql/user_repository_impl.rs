//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sg_core::domain::entities::user::{NewUser, User};
use sg_core::errors::{AuthError, DomainError};
use sg_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: row
                .try_get::<u64, _>("id")
                .map_err(|e| internal("get id", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| internal("get first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| internal("get last_name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| internal("get email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| internal("get password_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| internal("get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| internal("get updated_at", e))?,
        })
    }

    async fn find_one(&self, query: &str, bind: FindBy<'_>) -> Result<Option<User>, DomainError> {
        let query = sqlx::query(query);
        let query = match bind {
            FindBy::Id(id) => query.bind(id),
            FindBy::Email(email) => query.bind(email),
        };

        let result = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("query users", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

enum FindBy<'a> {
    Id(u64),
    Email(&'a str),
}

fn internal(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("User store failed to {}: {}", action, e);
    DomainError::Internal {
        message: format!("Failed to {}: {}", action, e),
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

const SELECT_USER: &str = r#"
    SELECT id, first_name, last_name, email, password_hash, created_at, updated_at
    FROM users
"#;

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_USER);
        self.find_one(&query, FindBy::Id(id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_USER);
        self.find_one(&query, FindBy::Email(email)).await
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                first_name, last_name, email, password_hash, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let now = Utc::now();
        let result = sqlx::query(query)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::EmailAlreadyExists.into()
                } else {
                    internal("insert user", e)
                }
            })?;

        Ok(User::from_new(result.last_insert_id(), new_user, now))
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET first_name = ?, last_name = ?, email = ?, password_hash = ?, updated_at = ?
            WHERE id = ?
        "#;

        let now = Utc::now();
        let result = sqlx::query(query)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(now)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::EmailAlreadyExists.into()
                } else {
                    internal("update user", e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        }

        Ok(User {
            updated_at: now,
            ..user
        })
    }
}
