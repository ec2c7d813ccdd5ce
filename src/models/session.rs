//! Server-side record backing a refresh token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One login session. The session id is embedded in the refresh token's
/// claims; `last_token_hash` holds the fingerprint of the most recently
/// issued refresh token, which makes older tokens single-use after rotation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub last_token_hash: String,
    pub initiated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl Session {
    pub fn new(
        id: String,
        user_id: String,
        last_token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            last_token_hash,
            initiated_at: Utc::now(),
            expires_at,
            revoked: false,
        }
    }

    /// A session accepts a presented refresh token only while it is not
    /// revoked, not expired, and the token's fingerprint matches the last
    /// one issued.
    pub fn accepts(&self, token_hash: &str, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now && self.last_token_hash == token_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn live_session() -> Session {
        Session::new(
            "sid-1".into(),
            "user-1".into(),
            "hash-a".into(),
            Utc::now() + Duration::days(3),
        )
    }

    #[test]
    fn accepts_matching_live_token() {
        let session = live_session();
        assert!(session.accepts("hash-a", Utc::now()));
    }

    #[test]
    fn rejects_stale_fingerprint() {
        let session = live_session();
        assert!(!session.accepts("hash-b", Utc::now()));
    }

    #[test]
    fn rejects_revoked_session() {
        let mut session = live_session();
        session.revoked = true;
        assert!(!session.accepts("hash-a", Utc::now()));
    }

    #[test]
    fn rejects_expired_session() {
        let session = live_session();
        let later = Utc::now() + Duration::days(4);
        assert!(!session.accepts("hash-a", later));
    }
}
