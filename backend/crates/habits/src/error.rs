//! Habit Error Types
//!
//! Habit-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Habit-specific result type alias
pub type HabitResult<T> = Result<T, HabitError>;

/// Habit-specific error variants
#[derive(Debug, Error)]
pub enum HabitError {
    /// Record has no owner stamped on it
    #[error("Habit owner is required")]
    OwnerRequired,

    /// Habit id missing or empty in the payload
    #[error("Habit id is required")]
    IdRequired,

    /// No habit with that id for this owner
    #[error("Habit not found")]
    NotFound,

    /// A habit with that id already exists for this owner
    #[error("Habit already exists")]
    AlreadyExists,

    /// Sync called with nothing to sync
    #[error("Habit batch is empty")]
    EmptyBatch,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HabitError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HabitError::OwnerRequired | HabitError::IdRequired | HabitError::EmptyBatch => {
                StatusCode::BAD_REQUEST
            }
            HabitError::NotFound => StatusCode::NOT_FOUND,
            HabitError::AlreadyExists => StatusCode::CONFLICT,
            HabitError::Database(_) | HabitError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HabitError::OwnerRequired | HabitError::IdRequired | HabitError::EmptyBatch => {
                ErrorKind::BadRequest
            }
            HabitError::NotFound => ErrorKind::NotFound,
            HabitError::AlreadyExists => ErrorKind::Conflict,
            HabitError::Database(_) | HabitError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            HabitError::Database(e) => {
                tracing::error!(error = %e, "Habit database error");
            }
            HabitError::Internal(msg) => {
                tracing::error!(message = %msg, "Habit internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Habit error");
            }
        }
    }
}

impl IntoResponse for HabitError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for HabitError {
    fn from(err: AppError) -> Self {
        HabitError::Internal(err.to_string())
    }
}
