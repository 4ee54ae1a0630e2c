//! Domain Entities

pub mod otp;
pub mod session;
pub mod user;

pub use otp::OtpRecord;
pub use session::Session;
pub use user::User;
