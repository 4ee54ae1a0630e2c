//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the mailer port.

pub mod entity;
pub mod mailer;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{OtpRecord, Session, User};
pub use mailer::VerificationMailer;
pub use repository::{OtpRepository, SessionRepository, UserRepository};
pub use value_object::Email;
