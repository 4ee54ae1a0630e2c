//! Accounts Backend Module
//!
//! Account lifecycle, email verification, and cookie-session auth.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and mailer ports
//! - `application/` - Use cases, configuration, token signing
//! - `infra/` - PostgreSQL and in-memory stores, SMTP mailer
//! - `presentation/` - HTTP handlers, DTOs, router, session gate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, plaintext zeroized after use
//! - Email ownership proven by a short-lived 6-digit code, single-use
//! - Server-side sessions; the cookie carries only an HMAC-signed id
//! - Rolling session expiry, pushed forward on each gated request

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountError, AccountResult};
pub use infra::memory::InMemoryAccountsRepository;
pub use infra::postgres::PgAccountsRepository;
pub use infra::smtp::{LogMailer, SmtpConfig, SmtpMailer};
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountsRepository as AccountsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
