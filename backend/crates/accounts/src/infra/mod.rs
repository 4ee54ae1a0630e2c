//! Infrastructure Layer
//!
//! PostgreSQL and in-memory stores, SMTP mailer.

pub mod memory;
pub mod postgres;
pub mod smtp;

pub use memory::InMemoryAccountsRepository;
pub use postgres::PgAccountsRepository;
pub use smtp::{LogMailer, SmtpConfig, SmtpMailer};
