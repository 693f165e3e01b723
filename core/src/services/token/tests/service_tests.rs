//! Issuance and validation tests for the token service

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use super::{fixture, test_config, TEST_SECRET};
use crate::domain::entities::token::{Claims, TokenType};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryRevocationRepository, InMemoryUserRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn token_error(result: Result<impl std::fmt::Debug, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected a token error, got {:?}", other),
    }
}

fn sign_raw(payload: serde_json::Value, secret: &str) -> String {
    encode(
        &Header::default(),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn test_issued_access_token_validates_as_access() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    let claims = f.service.validate_token(&pair.access_token).await.unwrap();

    assert_eq!(claims.token_type(), TokenType::Access);
    assert_eq!(claims.user_id(), f.user.id);
    match claims {
        Claims::Access(access) => {
            assert_eq!(access.email, "a@b.com");
            assert_eq!(access.first_name, "Ada");
            assert_eq!(access.last_name, "Lovelace");
        }
        Claims::Refresh(_) => panic!("expected access claims"),
    }
}

#[tokio::test]
async fn test_issued_refresh_token_validates_as_refresh() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    let claims = f.service.validate_token(&pair.refresh_token).await.unwrap();

    assert_eq!(claims.token_type(), TokenType::Refresh);
    assert_eq!(claims.user_id(), f.user.id);
}

#[tokio::test]
async fn test_pair_expiry_follows_configured_ttls() {
    let f = fixture().await;
    let now = f.clock_now();

    let pair = f.service.issue_token_pair(&f.user).unwrap();

    assert_eq!(pair.access_expires_at, now + Duration::minutes(5));
    assert_eq!(pair.refresh_expires_at, now + Duration::minutes(60));

    let access = f.service.validate_token(&pair.access_token).await.unwrap();
    assert_eq!(access.expires_at(), pair.access_expires_at);
}

#[tokio::test]
async fn test_pairs_issued_in_the_same_second_differ() {
    let f = fixture().await;

    let first = f.service.issue_token_pair(&f.user).unwrap();
    let second = f.service.issue_token_pair(&f.user).unwrap();

    assert_ne!(first.access_token, second.access_token);
    assert_ne!(first.refresh_token, second.refresh_token);
}

#[tokio::test]
async fn test_issuance_persists_nothing() {
    let f = fixture().await;

    f.service.issue_token_pair(&f.user).unwrap();

    assert!(f.revocations.is_empty().await);
}

#[tokio::test]
async fn test_access_token_expires_at_ttl() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    f.clock.advance(Duration::minutes(5) - Duration::seconds(1));
    assert!(f.service.validate_token(&pair.access_token).await.is_ok());

    f.clock.advance(Duration::seconds(1));
    assert_eq!(
        token_error(f.service.validate_token(&pair.access_token).await),
        TokenError::Expired
    );
}

#[tokio::test]
async fn test_tampering_any_byte_is_malformed_or_forged() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();
    // Revocation and expiry must never be what rejects a forged token
    f.service
        .revoke_token(&pair.access_token, f.clock_now() + Duration::minutes(60))
        .await
        .unwrap();
    f.clock.advance(Duration::minutes(10));

    let original = pair.access_token.as_bytes();
    for i in 0..original.len() {
        let mut tampered = original.to_vec();
        tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        assert_eq!(
            token_error(f.service.validate_token(&tampered).await),
            TokenError::MalformedOrForged,
            "byte {} was tampered",
            i
        );
    }
}

#[tokio::test]
async fn test_garbage_is_malformed_or_forged() {
    let f = fixture().await;

    for token in ["", "not-a-token", "a.b.c", "....."] {
        assert_eq!(
            token_error(f.service.validate_token(token).await),
            TokenError::MalformedOrForged
        );
    }
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_forged() {
    let f = fixture().await;
    let now = f.clock_now().timestamp();
    let forged = sign_raw(
        json!({
            "token_type": "refresh",
            "user_id": f.user.id,
            "iat": now,
            "exp": now + 3600,
            "jti": "x"
        }),
        "some-other-secret",
    );

    assert_eq!(
        token_error(f.service.validate_token(&forged).await),
        TokenError::MalformedOrForged
    );
}

#[tokio::test]
async fn test_signed_payload_of_unexpected_shape_is_malformed_claims() {
    let f = fixture().await;
    let now = f.clock_now().timestamp();

    let payloads = [
        json!({"user_id": 1, "iat": now, "exp": now + 3600, "jti": "x"}),
        json!({"token_type": "session", "user_id": 1, "iat": now, "exp": now + 3600, "jti": "x"}),
        json!({"token_type": "refresh", "user_id": "1", "iat": now, "exp": now + 3600, "jti": "x"}),
        json!({"token_type": "refresh", "iat": now, "exp": now + 3600, "jti": "x"}),
        json!({"token_type": "access", "user_id": 1, "iat": now, "exp": now + 3600, "jti": "x"}),
    ];

    for payload in payloads {
        let token = sign_raw(payload.clone(), TEST_SECRET);
        assert_eq!(
            token_error(f.service.validate_token(&token).await),
            TokenError::MalformedClaims,
            "payload {}",
            payload
        );
    }
}

#[tokio::test]
async fn test_validate_access_token_rejects_refresh_token() {
    let f = fixture().await;
    let pair = f.service.issue_token_pair(&f.user).unwrap();

    let claims = f
        .service
        .validate_access_token(&pair.access_token)
        .await
        .unwrap();
    assert_eq!(claims.user_id, f.user.id);

    assert_eq!(
        token_error(f.service.validate_access_token(&pair.refresh_token).await),
        TokenError::WrongTokenType {
            expected: "access".to_string(),
            actual: "refresh".to_string(),
        }
    );
}

#[test]
fn test_empty_secret_is_rejected() {
    let config = TokenServiceConfig {
        jwt_secret: String::new(),
        ..test_config()
    };

    let result = TokenService::new(
        Arc::new(InMemoryRevocationRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        config,
    );

    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[test]
fn test_non_positive_lifetime_is_rejected() {
    let config = TokenServiceConfig {
        access_token_expiry_minutes: 0,
        ..test_config()
    };

    let result = TokenService::new(
        Arc::new(InMemoryRevocationRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        config,
    );

    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[test]
fn test_out_of_range_lifetime_is_rejected() {
    let oversized = [
        TokenServiceConfig {
            access_token_expiry_minutes: 1_000_000_000_000,
            ..test_config()
        },
        TokenServiceConfig {
            refresh_token_expiry_minutes: 1_000_000_000_000,
            ..test_config()
        },
        TokenServiceConfig {
            access_token_expiry_minutes: i64::MAX,
            ..test_config()
        },
        TokenServiceConfig {
            refresh_token_expiry_minutes: -1,
            ..test_config()
        },
    ];

    for config in oversized {
        let result = TokenService::new(
            Arc::new(InMemoryRevocationRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            config.clone(),
        );

        assert!(
            matches!(result, Err(DomainError::Internal { .. })),
            "accepted {:?}",
            config
        );
    }
}

#[tokio::test]
async fn test_issuance_near_calendar_end_is_a_typed_error() {
    let f = fixture().await;
    f.clock
        .set(chrono::DateTime::<chrono::Utc>::MAX_UTC - Duration::minutes(1));

    assert!(matches!(
        f.service.issue_token_pair(&f.user),
        Err(DomainError::Internal { .. })
    ));
}

#[test]
fn test_default_config_uses_development_defaults() {
    let config = TokenServiceConfig::default();

    assert!(config.is_using_default_secret());
    assert_eq!(config.access_token_ttl(), Some(Duration::minutes(5)));
    assert_eq!(config.refresh_token_ttl(), Some(Duration::minutes(60)));
}
