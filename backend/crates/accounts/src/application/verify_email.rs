//! Verify Email Use Case
//!
//! Exchanges a verification code for a verified account and a first
//! session. Any habits the client accumulated while signed out are
//! synced in the same request, before the session is established, so
//! an error response never carries a fresh cookie.

use std::sync::Arc;

use habits::application::SyncHabitsUseCase;
use habits::domain::entity::Habit;
use habits::domain::repository::HabitRepository;

use crate::application::config::AccountsConfig;
use crate::application::session_token::generate_session_token;
use crate::domain::entity::Session;
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AccountError, AccountResult};
use kernel::principal::Principal;

/// Verify email input
pub struct VerifyEmailInput {
    pub email: String,
    pub code: String,
    /// Habits held on the device before the account existed
    pub habits: Vec<Habit>,
}

/// Verify email output
#[derive(Debug)]
pub struct VerifyEmailOutput {
    pub user_id: String,
    pub name: String,
    pub session_token: String,
}

/// Verify email use case
pub struct VerifyEmailUseCase<U, O, S, H>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionRepository,
    H: HabitRepository,
{
    user_repo: Arc<U>,
    otp_repo: Arc<O>,
    session_repo: Arc<S>,
    habit_repo: Arc<H>,
    config: Arc<AccountsConfig>,
}

impl<U, O, S, H> VerifyEmailUseCase<U, O, S, H>
where
    U: UserRepository,
    O: OtpRepository,
    S: SessionRepository,
    H: HabitRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        otp_repo: Arc<O>,
        session_repo: Arc<S>,
        habit_repo: Arc<H>,
        config: Arc<AccountsConfig>,
    ) -> Self {
        Self {
            user_repo,
            otp_repo,
            session_repo,
            habit_repo,
            config,
        }
    }

    pub async fn execute(&self, input: VerifyEmailInput) -> AccountResult<VerifyEmailOutput> {
        let email = Email::new(&input.email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        self.otp_repo
            .find_valid(&email, &input.code)
            .await?
            .ok_or(AccountError::InvalidCode)?;

        // Full purge: every outstanding code for this email dies with
        // the one that was consumed.
        self.otp_repo.delete_all_for_email(&email).await?;

        let mut user = user;
        user.mark_verified();
        self.user_repo.update(&user).await?;

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
            "Email verified, session established"
        );

        Ok(VerifyEmailOutput {
            user_id: user.user_id.into_string(),
            name: user.name,
            session_token,
        })
    }
}
