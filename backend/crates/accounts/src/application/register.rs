//! Register Use Case
//!
//! Creates an unverified account and emails a verification code.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{OtpRecord, User};
use crate::domain::mailer::VerificationMailer;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Id minted on the client, carried over when present
    pub requested_id: Option<String>,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: String,
    pub email: String,
}

/// Register use case
pub struct RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: VerificationMailer,
{
    user_repo: Arc<U>,
    otp_repo: Arc<O>,
    mailer: Arc<M>,
    config: Arc<AccountsConfig>,
}

impl<U, O, M> RegisterUseCase<U, O, M>
where
    U: UserRepository,
    O: OtpRepository,
    M: VerificationMailer,
{
    pub fn new(
        user_repo: Arc<U>,
        otp_repo: Arc<O>,
        mailer: Arc<M>,
        config: Arc<AccountsConfig>,
    ) -> Self {
        Self {
            user_repo,
            otp_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<RegisterOutput> {
        let email = Email::new(&input.email)?;

        if input.name.trim().is_empty() {
            return Err(AccountError::Validation("Name cannot be empty".to_string()));
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash()?;

        let user = User::new(input.name, email.clone(), password_hash, input.requested_id);
        self.user_repo.create(&user).await?;

        let code = platform::otp::generate_code();
        let record = OtpRecord::new(email.clone(), code.clone(), self.config.otp_ttl_chrono());
        self.otp_repo.create(&record).await?;

        // A failed send surfaces as an error but the user row stays
        // written; the code in the store remains valid until its TTL.
        self.mailer
            .send_verification_code(&email, &user.name, &code)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            "User registered, verification code sent"
        );

        Ok(RegisterOutput {
            user_id: user.user_id.into_string(),
            email: email.into_db(),
        })
    }
}
