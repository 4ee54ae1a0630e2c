//! Application Layer
//!
//! Use cases, configuration, and token signing.

pub mod change_password;
pub mod check_session;
pub mod config;
pub mod delete_account;
pub mod login;
pub mod register;
pub mod session_token;
pub mod sign_out;
pub mod verify_email;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use check_session::{CheckSessionUseCase, SessionInfoOutput};
pub use config::AccountsConfig;
pub use delete_account::DeleteAccountUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use sign_out::SignOutUseCase;
pub use verify_email::{VerifyEmailInput, VerifyEmailOutput, VerifyEmailUseCase};
