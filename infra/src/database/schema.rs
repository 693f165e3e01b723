//! Schema owned by SessionGuard.
//!
//! Statements are idempotent and run in order at startup.

/// Registered users
pub const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
    first_name    VARCHAR(100)    NOT NULL,
    last_name     VARCHAR(100)    NOT NULL,
    email         VARCHAR(255)    NOT NULL,
    password_hash VARCHAR(255)    NOT NULL,
    created_at    DATETIME(6)     NOT NULL,
    updated_at    DATETIME(6)     NOT NULL,
    PRIMARY KEY (id),
    UNIQUE KEY uk_users_email (email)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Revocation list, keyed by the SHA-256 hex digest of the token
pub const CREATE_REVOKED_TOKENS: &str = r#"
CREATE TABLE IF NOT EXISTS revoked_tokens (
    token_hash CHAR(64)    NOT NULL,
    expires_at DATETIME(6) NOT NULL,
    created_at DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    PRIMARY KEY (token_hash),
    KEY idx_revoked_tokens_expires_at (expires_at)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub const STATEMENTS: [&str; 2] = [CREATE_USERS, CREATE_REVOKED_TOKENS];
