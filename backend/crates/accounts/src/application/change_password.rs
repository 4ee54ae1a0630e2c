//! Change Password Use Case
//!
//! Re-verifies the current password before accepting a new one.
//! Existing sessions, including on other devices, stay valid.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};
use kernel::principal::Principal;

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        input: ChangePasswordInput,
    ) -> AccountResult<()> {
        // The session already vouched for this id; a missing row means
        // the account was deleted underneath a live session.
        let mut user = self
            .user_repo
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let current = ClearTextPassword::new(input.current_password)
            .map_err(|_| AccountError::InvalidCredentials)?;

        if !user.password_hash.verify(&current) {
            return Err(AccountError::InvalidCredentials);
        }

        let new_password = ClearTextPassword::new(input.new_password)?;
        user.password_hash = new_password.hash()?;

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}
