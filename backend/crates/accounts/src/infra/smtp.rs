//! SMTP Mailer Implementation
//!
//! Delivers the verification-code email over SMTP via lettre. The
//! message carries both a plain-text part and the branded HTML card.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::domain::mailer::VerificationMailer;
use crate::domain::value_object::Email;
use crate::error::{AccountError, AccountResult};

/// SMTP configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

/// SMTP verification mailer
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> AccountResult<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AccountError::MailDelivery(e.to_string()))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    fn render_text(name: &str, code: &str) -> String {
        format!(
            "Welcome, {name}!\n\n\
             Your verification code is: {code}\n\n\
             Copy the code into the app to verify your email.\n\
             If you did not request this, you can ignore this message.\n"
        )
    }

    fn render_html(name: &str, code: &str) -> String {
        format!(
            r##"<table style="background:#4A64FD; padding:30px 0; font-family:Arial" cellpadding="0" cellspacing="0" width="100%">
  <tr>
    <td align="center">
      <table style="border-radius:15px; background:#FFF; padding:30px 30px;" width="600" cellpadding="0" cellspacing="0">
        <tr>
          <td align="center" style="font-size:24px; font-weight:bold; color:#2E334E; padding-bottom:30px;">
            Welcome, {name}!
          </td>
        </tr>
        <tr>
          <td align="center" style="padding-bottom:30px;">
            <table style="letter-spacing:3px; border-radius:10px; background:#4A64FD; padding:12px 0;" cellpadding="0" cellspacing="0" width="130px">
              <tr>
                <td align="center" style="font-size:20px; font-weight:bold; color:#fff;">{code}</td>
              </tr>
            </table>
          </td>
        </tr>
        <tr>
          <td align="center" style="font-size:14px; color:#2E334E; padding:5px 0;">
            Copy the code into the app to verify your email.
          </td>
        </tr>
        <tr>
          <td align="center" style="font-size:14px; color:#2E334E;">
            If you did not request this, you can ignore this message.
          </td>
        </tr>
      </table>
    </td>
  </tr>
</table>"##
        )
    }
}

impl VerificationMailer for SmtpMailer {
    async fn send_verification_code(
        &self,
        to: &Email,
        name: &str,
        code: &str,
    ) -> AccountResult<()> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| AccountError::MailDelivery("Invalid from address".to_string()))?,
            )
            .to(to
                .as_str()
                .parse()
                .map_err(|_| AccountError::MailDelivery("Invalid recipient".to_string()))?)
            .subject("Your verification code")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(Self::render_text(name, code)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(Self::render_html(name, code)),
                    ),
            )
            .map_err(|e| AccountError::MailDelivery(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AccountError::MailDelivery(e.to_string()))?;

        tracing::info!(to = %to, "Verification email sent");
        Ok(())
    }
}

/// Mailer that only logs, for development without an SMTP server
#[derive(Clone, Default)]
pub struct LogMailer;

impl VerificationMailer for LogMailer {
    async fn send_verification_code(
        &self,
        to: &Email,
        _name: &str,
        code: &str,
    ) -> AccountResult<()> {
        tracing::info!(to = %to, code = %code, "Verification code (not sent, log-only mailer)");
        Ok(())
    }
}
