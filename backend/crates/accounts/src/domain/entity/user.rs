//! User Entity
//!
//! An account in one of two states: registered-but-unverified, or
//! verified. Only a verified account can log in; verification happens
//! once, by submitting the emailed code.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::Email;
use kernel::id::UserId;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Account id; client-supplied when provided, otherwise generated
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Normalized, unique email
    pub email: Email,
    /// Argon2id PHC string
    pub password_hash: HashedPassword,
    /// Whether the email has been proven via verification code
    pub verified: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new unverified user.
    ///
    /// `requested_id` lets a client carry over an id minted on the
    /// device; when absent a fresh UUID is generated.
    pub fn new(
        name: String,
        email: Email,
        password_hash: HashedPassword,
        requested_id: Option<String>,
    ) -> Self {
        let user_id = match requested_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => UserId::from_string(id),
            None => UserId::new(),
        };

        Self {
            user_id,
            name,
            email,
            password_hash,
            verified: false,
            created_at: Utc::now(),
        }
    }

    /// Transition to the verified state.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn hash() -> HashedPassword {
        ClearTextPassword::new("correct horse battery".to_string())
            .unwrap()
            .hash()
            .unwrap()
    }

    #[test]
    fn test_new_user_is_unverified() {
        let user = User::new(
            "Alice".to_string(),
            Email::new("alice@example.com").unwrap(),
            hash(),
            None,
        );
        assert!(!user.verified);
        assert!(!user.user_id.as_str().is_empty());
    }

    #[test]
    fn test_requested_id_is_kept() {
        let user = User::new(
            "Alice".to_string(),
            Email::new("alice@example.com").unwrap(),
            hash(),
            Some("device-17".to_string()),
        );
        assert_eq!(user.user_id.as_str(), "device-17");
    }

    #[test]
    fn test_blank_requested_id_is_replaced() {
        let user = User::new(
            "Alice".to_string(),
            Email::new("alice@example.com").unwrap(),
            hash(),
            Some("   ".to_string()),
        );
        assert_ne!(user.user_id.as_str().trim(), "");
    }

    #[test]
    fn test_mark_verified() {
        let mut user = User::new(
            "Alice".to_string(),
            Email::new("alice@example.com").unwrap(),
            hash(),
            None,
        );
        user.mark_verified();
        assert!(user.verified);
    }
}
