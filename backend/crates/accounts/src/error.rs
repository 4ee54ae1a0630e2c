//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// A user with this email already exists
    ///
    /// Presented as 400, matching the public API contract.
    #[error("A user with this email already exists")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login attempted before the email was verified
    #[error("Email not verified")]
    NotVerified,

    /// Verification code missing, expired, or wrong
    #[error("Invalid or expired verification code")]
    InvalidCode,

    /// Session not found, expired, or token tampered with
    #[error("Session not found or expired")]
    SessionInvalid,

    /// User row vanished mid-flow (session points at a deleted account)
    #[error("User not found")]
    UserNotFound,

    /// Request payload failed validation (email format, password policy)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Verification email could not be delivered
    #[error("Failed to send verification email")]
    MailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::EmailTaken
            | AccountError::InvalidCode
            | AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::InvalidCredentials | AccountError::SessionInvalid => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::NotVerified => StatusCode::FORBIDDEN,
            AccountError::MailDelivery(_) => StatusCode::SERVICE_UNAVAILABLE,
            AccountError::UserNotFound
            | AccountError::Database(_)
            | AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::EmailTaken
            | AccountError::InvalidCode
            | AccountError::Validation(_) => ErrorKind::BadRequest,
            AccountError::InvalidCredentials | AccountError::SessionInvalid => {
                ErrorKind::Unauthorized
            }
            AccountError::NotVerified => ErrorKind::Forbidden,
            AccountError::MailDelivery(_) => ErrorKind::ServiceUnavailable,
            AccountError::UserNotFound
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::MailDelivery(detail) => {
                tracing::error!(detail = %detail, "Verification email delivery failed");
            }
            AccountError::UserNotFound | AccountError::Internal(_) => {
                tracing::error!(error = %self, "Account internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AccountError::Validation(err.to_string()),
            _ => AccountError::Internal(err.to_string()),
        }
    }
}

impl From<habits::HabitError> for AccountError {
    fn from(err: habits::HabitError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AccountError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AccountError::Validation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AccountError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
