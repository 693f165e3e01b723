//! Revocation list entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A token that was explicitly invalidated until `expires_at`.
///
/// The list is a denylist: absence of an entry means "not known to be
/// revoked", never "valid".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// The revoked token string
    pub token: String,

    /// End of the revocation window, independent of the token's own `exp`
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// An entry still revokes its token while `expires_at > now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_entry_window_is_exclusive_at_expiry() {
        let now = Utc::now();
        let entry = RevocationEntry::new("token", now + Duration::minutes(5));

        assert!(entry.is_active_at(now));
        assert!(!entry.is_active_at(now + Duration::minutes(5)));
        assert!(!entry.is_active_at(now + Duration::minutes(6)));
    }
}
