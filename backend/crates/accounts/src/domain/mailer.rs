//! Notifier Port
//!
//! Outbound email delivery as a domain port; the SMTP implementation
//! lives in the infrastructure layer.

use crate::domain::value_object::Email;
use crate::error::AccountResult;

/// Verification mailer trait
#[trait_variant::make(VerificationMailer: Send)]
pub trait LocalVerificationMailer {
    /// Deliver a verification code to a freshly registered address.
    ///
    /// No retries; a failed send surfaces to the caller.
    async fn send_verification_code(
        &self,
        to: &Email,
        name: &str,
        code: &str,
    ) -> AccountResult<()>;
}
