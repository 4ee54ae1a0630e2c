//! Login Use Case
//!
//! Authenticates a verified user and creates a session. Unverified
//! accounts are rejected even with the correct password.

use std::sync::Arc;

use habits::application::SyncHabitsUseCase;
use habits::domain::entity::Habit;
use habits::domain::repository::HabitRepository;
use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::application::session_token::generate_session_token;
use crate::domain::entity::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AccountError, AccountResult};
use kernel::principal::Principal;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Habits held on the device while signed out
    pub habits: Vec<Habit>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: String,
    pub name: String,
    pub session_token: String,
}

/// Login use case
pub struct LoginUseCase<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: HabitRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    habit_repo: Arc<H>,
    config: Arc<AccountsConfig>,
}

impl<U, S, H> LoginUseCase<U, S, H>
where
    U: UserRepository,
    S: SessionRepository,
    H: HabitRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        habit_repo: Arc<H>,
        config: Arc<AccountsConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            habit_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let email = Email::new(&input.email).map_err(|_| AccountError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|_| AccountError::InvalidCredentials)?;

        if !user.password_hash.verify(&password) {
            return Err(AccountError::InvalidCredentials);
        }

        // Wrong password answers 401 before the verified check can 403.
        if !user.verified {
            return Err(AccountError::NotVerified);
        }

        let principal = Principal::new(user.user_id.clone());
        if !input.habits.is_empty() {
            SyncHabitsUseCase::new(self.habit_repo.clone())
                .execute(&principal, input.habits)
                .await?;
        }

        let session = Session::new(user.user_id.clone(), self.config.session_ttl_chrono());
        self.session_repo.create(&session).await?;

        let session_token = generate_session_token(session.session_id, &self.config.session_secret);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            user_id: user.user_id.into_string(),
            name: user.name,
            session_token,
        })
    }
}
