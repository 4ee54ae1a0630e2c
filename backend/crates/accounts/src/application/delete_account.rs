//! Delete Account Use Case
//!
//! Habits are removed first; the user row is only deleted once that
//! succeeds, so a partial failure leaves a complete, working account
//! rather than an orphaned one.

use std::sync::Arc;

use habits::domain::repository::HabitRepository;

use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::error::{AccountError, AccountResult};
use kernel::principal::Principal;

/// Delete account use case
pub struct DeleteAccountUseCase<U, O, S, H>
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
}

impl<U, O, S, H> DeleteAccountUseCase<U, O, S, H>
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
    ) -> Self {
        Self {
            user_repo,
            otp_repo,
            session_repo,
            habit_repo,
        }
    }

    pub async fn execute(&self, principal: &Principal) -> AccountResult<()> {
        let user = self
            .user_repo
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let removed = self
            .habit_repo
            .delete_all_for_owner(&principal.user_id)
            .await?;

        self.user_repo.delete(&principal.user_id).await?;
        self.session_repo.delete_all_for_user(&principal.user_id).await?;

        self.otp_repo.delete_all_for_email(&user.email).await?;

        tracing::info!(
            user_id = %principal.user_id,
            habits_removed = removed,
            "Account deleted"
        );

        Ok(())
    }
}
