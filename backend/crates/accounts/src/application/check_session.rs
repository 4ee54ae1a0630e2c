//! Check Session Use Case
//!
//! Verifies a cookie token, loads the session row, and applies the
//! rolling extension.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::entity::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AccountError, AccountResult};

/// Session info output
#[derive(Debug)]
pub struct SessionInfoOutput {
    pub user_id: String,
    pub expires_at_ms: i64,
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Check if session is valid and return session info
    pub async fn execute(&self, session_token: &str) -> AccountResult<SessionInfoOutput> {
        let session = self.get_session(session_token).await?;

        Ok(SessionInfoOutput {
            user_id: session.user_id.into_string(),
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Get session and push the rolling expiry forward
    pub async fn get_session(&self, session_token: &str) -> AccountResult<Session> {
        let session_id = parse_session_token(session_token, &self.config.session_secret)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AccountError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AccountError::SessionInvalid);
        }

        let mut session = session;
        session.touch();
        session.extend(self.config.session_ttl_chrono());

        // Persist the extension in the background; the request does
        // not wait on the activity write.
        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
