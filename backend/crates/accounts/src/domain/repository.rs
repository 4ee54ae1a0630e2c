//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{OtpRecord, Session, User};
use crate::domain::value_object::Email;
use crate::error::AccountResult;
use kernel::id::UserId;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; fails with `EmailTaken` on a duplicate email
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Update user (verified flag, password hash)
    async fn update(&self, user: &User) -> AccountResult<()>;

    /// Delete user
    async fn delete(&self, user_id: &UserId) -> AccountResult<()>;
}

/// Verification code repository trait
#[trait_variant::make(OtpRepository: Send)]
pub trait LocalOtpRepository {
    /// Store a code; several codes may be outstanding for one email
    async fn create(&self, record: &OtpRecord) -> AccountResult<()>;

    /// Find a non-expired record matching both email and code exactly.
    ///
    /// An expired record is treated as absent even if eviction lags.
    async fn find_valid(&self, email: &Email, code: &str) -> AccountResult<Option<OtpRecord>>;

    /// Purge every code for an email
    async fn delete_all_for_email(&self, email: &Email) -> AccountResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AccountResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: Uuid) -> AccountResult<Option<Session>>;

    /// Update session (expiry, last activity)
    async fn update(&self, session: &Session) -> AccountResult<()>;

    /// Delete session
    async fn delete(&self, session_id: Uuid) -> AccountResult<()>;

    /// Delete every session owned by a user
    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<()>;
}
