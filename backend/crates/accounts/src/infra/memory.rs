//! In-Memory Repository Implementation
//!
//! Backs the use-case tests and local development without a database.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{OtpRecord, Session, User};
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AccountError, AccountResult};
use kernel::id::UserId;

/// In-memory accounts repository
#[derive(Clone, Default)]
pub struct InMemoryAccountsRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    otp_codes: Arc<RwLock<HashMap<String, Vec<OtpRecord>>>>,
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl InMemoryAccountsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryAccountsRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AccountError::EmailTaken);
        }

        users.insert(user.user_id.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(user_id.as_str()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == *email).cloned())
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        let mut users = self.users.write().await;

        match users.get_mut(user.user_id.as_str()) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AccountError::UserNotFound),
        }
    }

    async fn delete(&self, user_id: &UserId) -> AccountResult<()> {
        let mut users = self.users.write().await;

        match users.remove(user_id.as_str()) {
            Some(_) => Ok(()),
            None => Err(AccountError::UserNotFound),
        }
    }
}

impl OtpRepository for InMemoryAccountsRepository {
    async fn create(&self, record: &OtpRecord) -> AccountResult<()> {
        let mut codes = self.otp_codes.write().await;
        codes
            .entry(record.email.as_str().to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn find_valid(&self, email: &Email, code: &str) -> AccountResult<Option<OtpRecord>> {
        let codes = self.otp_codes.read().await;
        Ok(codes
            .get(email.as_str())
            .and_then(|records| records.iter().find(|r| r.matches(code)))
            .cloned())
    }

    async fn delete_all_for_email(&self, email: &Email) -> AccountResult<()> {
        let mut codes = self.otp_codes.write().await;
        codes.remove(email.as_str());
        Ok(())
    }
}

impl SessionRepository for InMemoryAccountsRepository {
    async fn create(&self, session: &Session) -> AccountResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AccountResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&session_id).cloned())
    }

    async fn update(&self, session: &Session) -> AccountResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AccountResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&session_id);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.user_id != *user_id);
        Ok(())
    }
}
