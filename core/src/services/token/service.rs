//! Main token service implementation

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::token::{
    AccessClaims, AccessToken, Claims, RefreshClaims, TokenPair, TokenType,
};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::{RevocationRepository, UserRepository};
use crate::services::revocation::RevocationService;

use super::config::{checked_lifetime, expiry_after, TokenServiceConfig};

/// Service issuing, validating, refreshing and revoking HS256 session tokens
pub struct TokenService<R: RevocationRepository, U: UserRepository> {
    revocations: Arc<RevocationService<R>>,
    users: Arc<U>,
    config: TokenServiceConfig,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: RevocationRepository, U: UserRepository> TokenService<R, U> {
    /// Creates a new token service using the wall clock
    ///
    /// # Arguments
    ///
    /// * `revocation_repository` - Storage for the revocation list
    /// * `user_repository` - Identity lookup used by the refresh exchange
    /// * `config` - Signing secret and token lifetimes
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an error if the configuration is unusable
    pub fn new(
        revocation_repository: Arc<R>,
        user_repository: Arc<U>,
        config: TokenServiceConfig,
    ) -> DomainResult<Self> {
        Self::with_clock(
            revocation_repository,
            user_repository,
            config,
            Arc::new(SystemClock),
        )
    }

    /// Creates a new token service with an explicit clock
    pub fn with_clock(
        revocation_repository: Arc<R>,
        user_repository: Arc<U>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> DomainResult<Self> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        let now = clock.now();
        let access_ttl = checked_lifetime(
            "Access token lifetime",
            config.access_token_expiry_minutes,
            now,
        )?;
        let refresh_ttl = checked_lifetime(
            "Refresh token lifetime",
            config.refresh_token_expiry_minutes,
            now,
        )?;
        if config.is_using_default_secret() {
            warn!("JWT_SECRET is not set; signing with the built-in development secret");
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked by hand after the revocation lookup
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        let revocations = Arc::new(RevocationService::new(revocation_repository, clock.clone()));

        Ok(Self {
            revocations,
            users: user_repository,
            config,
            access_ttl,
            refresh_ttl,
            clock,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a signed access/refresh pair for `user`
    ///
    /// Nothing is persisted. Either both tokens are returned or neither.
    pub fn issue_token_pair(&self, user: &User) -> DomainResult<TokenPair> {
        let now = self.clock.now();
        let access_expires_at = expiry_after(now, self.access_ttl)?;
        let refresh_expires_at = expiry_after(now, self.refresh_ttl)?;
        let access = AccessClaims::new(user, now, access_expires_at);
        let refresh = RefreshClaims::new(user.id, now, refresh_expires_at);

        let pair = TokenPair {
            access_token: self.sign(&Claims::Access(access.clone()))?,
            refresh_token: self.sign(&Claims::Refresh(refresh.clone()))?,
            access_expires_at,
            refresh_expires_at,
        };

        info!(
            user_id = user.id,
            access_jti = %access.jti,
            refresh_jti = %refresh.jti,
            "Issued token pair"
        );
        Ok(pair)
    }

    /// Validates a token of either kind.
    ///
    /// Checks, in order: signature, claim shape, revocation list, expiry.
    pub async fn validate_token(&self, token: &str) -> DomainResult<Claims> {
        let claims = self.decode_verified(token)?;

        if self.revocations.is_revoked(token).await? {
            warn!(
                user_id = claims.user_id(),
                jti = %claims.jti(),
                token_type = %claims.token_type(),
                "Rejected revoked token"
            );
            return Err(TokenError::Revoked.into());
        }

        if claims.is_expired_at(self.clock.now()) {
            debug!(
                user_id = claims.user_id(),
                jti = %claims.jti(),
                token_type = %claims.token_type(),
                "Rejected expired token"
            );
            return Err(TokenError::Expired.into());
        }

        Ok(claims)
    }

    /// Validates a bearer credential; refresh tokens are rejected
    pub async fn validate_access_token(&self, token: &str) -> DomainResult<AccessClaims> {
        match self.validate_token(token).await? {
            Claims::Access(claims) => Ok(claims),
            other => Err(wrong_type(TokenType::Access, &other)),
        }
    }

    /// Validates a refresh token and resolves the user it was issued for
    pub async fn validate_refresh_token(&self, token: &str) -> DomainResult<User> {
        let claims = match self.validate_token(token).await? {
            Claims::Refresh(claims) => claims,
            other => return Err(wrong_type(TokenType::Refresh, &other)),
        };

        match self.users.find_by_id(claims.user_id).await? {
            Some(user) => Ok(user),
            None => {
                warn!(
                    user_id = claims.user_id,
                    jti = %claims.jti,
                    "Refresh token subject no longer exists"
                );
                Err(TokenError::IdentityNotFound.into())
            }
        }
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The refresh token is left untouched and can be used again. The new
    /// access token carries the user's current profile.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> DomainResult<AccessToken> {
        let user = self.validate_refresh_token(refresh_token).await?;

        let now = self.clock.now();
        let expires_at = expiry_after(now, self.access_ttl)?;
        let claims = AccessClaims::new(&user, now, expires_at);
        let token = self.sign(&Claims::Access(claims.clone()))?;

        info!(user_id = user.id, jti = %claims.jti, "Refreshed access token");
        Ok(AccessToken { token, expires_at })
    }

    /// Puts `token` on the revocation list until `revoke_until`
    pub async fn revoke_token(&self, token: &str, revoke_until: DateTime<Utc>) -> DomainResult<()> {
        self.revocations.revoke(token, revoke_until).await
    }

    /// Removes closed revocation windows
    pub async fn sweep_revocations(&self) -> DomainResult<usize> {
        self.revocations.sweep().await
    }

    pub fn revocations(&self) -> &Arc<RevocationService<R>> {
        &self.revocations
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Verifies the signature, then decodes the payload into typed claims
    fn decode_verified(&self, token: &str) -> DomainResult<Claims> {
        let payload = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Rejected token that failed signature verification");
                TokenError::MalformedOrForged
            })?
            .claims;

        serde_json::from_value::<Claims>(Value::Object(payload)).map_err(|e| {
            warn!(error = %e, "Rejected signed token with unexpected claims");
            TokenError::MalformedClaims.into()
        })
    }

    fn sign<T: Serialize>(&self, claims: &T) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Failed to sign token");
            TokenError::SigningFailed.into()
        })
    }
}

fn wrong_type(expected: TokenType, claims: &Claims) -> DomainError {
    warn!(
        user_id = claims.user_id(),
        jti = %claims.jti(),
        expected = %expected,
        actual = %claims.token_type(),
        "Rejected token of the wrong type"
    );
    TokenError::WrongTokenType {
        expected: expected.to_string(),
        actual: claims.token_type().to_string(),
    }
    .into()
}
