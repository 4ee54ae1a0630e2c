//! Verification Code Entity
//!
//! One outstanding email-verification code. Several codes may be
//! outstanding for the same email; a successful verification purges
//! all of them so nothing can be replayed.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::Email;

/// Outstanding verification code for one email
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub email: Email,
    /// 6 ASCII digits, leading zeros allowed
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn new(email: Email, code: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            email,
            code,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Exact match against the submitted code; expired codes never match.
    pub fn matches(&self, submitted: &str) -> bool {
        !self.is_expired() && self.code == submitted
    }
}
