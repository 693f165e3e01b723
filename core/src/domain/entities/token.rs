//! Token entities for JWT-based session credentials.
//!
//! The JWT payload is a flat JSON object discriminated by `token_type`:
//!
//! ```json
//! {"token_type":"access","user_id":7,"first_name":"Ada","last_name":"Lovelace",
//!  "email":"a@b.com","iat":1700000000,"exp":1700000300,"jti":"..."}
//! ```

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// Purpose a token was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived bearer credential for API calls
    Access,
    /// Longer-lived credential only accepted by the refresh exchange
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub user_id: u64,

    /// Denormalized profile fields for downstream convenience
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl AccessClaims {
    /// Creates access claims for `user`, valid from `issued_at` until `expires_at`
    pub fn new(user: &User, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Claims carried by a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject (user ID)
    pub user_id: u64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl RefreshClaims {
    /// Creates refresh claims for `user_id`, valid from `issued_at` until `expires_at`
    pub fn new(user_id: u64, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Verified claims of either token kind.
///
/// Consumers must match on the variant before trusting the token's purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "token_type", rename_all = "lowercase")]
pub enum Claims {
    Access(AccessClaims),
    Refresh(RefreshClaims),
}

impl Claims {
    /// Kind of token these claims were issued for
    pub fn token_type(&self) -> TokenType {
        match self {
            Claims::Access(_) => TokenType::Access,
            Claims::Refresh(_) => TokenType::Refresh,
        }
    }

    /// Subject (user ID)
    pub fn user_id(&self) -> u64 {
        match self {
            Claims::Access(c) => c.user_id,
            Claims::Refresh(c) => c.user_id,
        }
    }

    /// Expiration as a Unix timestamp
    pub fn exp(&self) -> i64 {
        match self {
            Claims::Access(c) => c.exp,
            Claims::Refresh(c) => c.exp,
        }
    }

    pub fn jti(&self) -> &str {
        match self {
            Claims::Access(c) => &c.jti,
            Claims::Refresh(c) => &c.jti,
        }
    }

    /// Expiration as an absolute instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp())
    }

    /// A token is expired once `now` reaches its `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp()
    }
}

impl From<AccessClaims> for Claims {
    fn from(claims: AccessClaims) -> Self {
        Claims::Access(claims)
    }
}

impl From<RefreshClaims> for Claims {
    fn from(claims: RefreshClaims) -> Self {
        Claims::Refresh(claims)
    }
}

/// Token pair returned by issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// When the access token stops validating
    pub access_expires_at: DateTime<Utc>,

    /// When the refresh token stops validating
    pub refresh_expires_at: DateTime<Utc>,
}

/// Freshly minted access token returned by the refresh exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

fn timestamp_to_datetime(timestamp: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn user() -> User {
        User {
            id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "a@b.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_access_claims_carry_profile() {
        let now = Utc::now();
        let claims = AccessClaims::new(&user(), now, now + Duration::minutes(5));

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.first_name, "Ada");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 300);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_claims_are_unique_per_issuance() {
        let now = Utc::now();
        let a = RefreshClaims::new(7, now, now + Duration::minutes(60));
        let b = RefreshClaims::new(7, now, now + Duration::minutes(60));

        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_wire_shape_is_tagged_by_token_type() {
        let now = Utc::now();
        let claims: Claims = AccessClaims::new(&user(), now, now + Duration::minutes(5)).into();
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["token_type"], "access");
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["email"], "a@b.com");

        let claims: Claims = RefreshClaims::new(7, now, now + Duration::minutes(60)).into();
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["token_type"], "refresh");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn test_decode_rejects_unknown_shapes() {
        let missing_type = json!({"user_id": 7, "exp": 1, "iat": 0, "jti": "x"});
        assert!(serde_json::from_value::<Claims>(missing_type).is_err());

        let unknown_type =
            json!({"token_type": "id", "user_id": 7, "exp": 1, "iat": 0, "jti": "x"});
        assert!(serde_json::from_value::<Claims>(unknown_type).is_err());

        let string_subject =
            json!({"token_type": "refresh", "user_id": "7", "exp": 1, "iat": 0, "jti": "x"});
        assert!(serde_json::from_value::<Claims>(string_subject).is_err());

        let access_without_email = json!({
            "token_type": "access", "user_id": 7, "first_name": "Ada",
            "last_name": "Lovelace", "exp": 1, "iat": 0, "jti": "x"
        });
        assert!(serde_json::from_value::<Claims>(access_without_email).is_err());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let claims: Claims = RefreshClaims::new(7, now, now + Duration::seconds(10)).into();

        assert!(!claims.is_expired_at(now));
        assert!(!claims.is_expired_at(now + Duration::seconds(9)));
        assert!(claims.is_expired_at(now + Duration::seconds(10)));
        assert_eq!(claims.expires_at().timestamp(), claims.exp());
        assert_eq!(claims.token_type(), TokenType::Refresh);
        assert_eq!(TokenType::Access.to_string(), "access");
    }
}
