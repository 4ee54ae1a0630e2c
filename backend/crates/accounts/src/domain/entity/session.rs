//! Session Entity
//!
//! A server-side session row referenced by a signed cookie token.
//! Sessions are rolling: every authenticated request pushes the
//! expiry forward by the full TTL.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use kernel::id::UserId;

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4), the value that gets signed into the token
    pub session_id: Uuid,
    /// Owning account
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session.
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Rolling extension: reset the expiry to the full TTL from now.
    pub fn extend(&mut self, ttl: Duration) {
        self.expires_at_ms = (Utc::now() + ttl).timestamp_millis();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_new_session_is_not_expired() {
        let session = Session::new(Id::from_string("u1"), Duration::days(3));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_extend_pushes_expiry_forward() {
        let mut session = Session::new(Id::from_string("u1"), Duration::seconds(1));
        let before = session.expires_at_ms;
        session.extend(Duration::days(3));
        assert!(session.expires_at_ms > before);
    }

    #[test]
    fn test_zero_ttl_session_expires() {
        let session = Session::new(Id::from_string("u1"), Duration::milliseconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }
}
