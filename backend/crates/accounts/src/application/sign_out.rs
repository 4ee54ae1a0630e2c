//! Sign Out Use Case
//!
//! Best-effort session teardown: the cookie is always cleared, even
//! when the token was invalid or the row already gone.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AccountResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, session_token: Option<&str>) -> AccountResult<()> {
        let Some(token) = session_token else {
            return Ok(());
        };

        let Ok(session_id) = parse_session_token(token, &self.config.session_secret) else {
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");

        Ok(())
    }
}
