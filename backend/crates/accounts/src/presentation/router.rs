//! Accounts Router

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use habits::domain::repository::HabitRepository;
use habits::infra::postgres::PgHabitRepository;

use crate::application::config::AccountsConfig;
use crate::domain::mailer::VerificationMailer;
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::infra::postgres::PgAccountsRepository;
use crate::infra::smtp::SmtpMailer;
use crate::presentation::handlers::{self, AccountsAppState};
use crate::presentation::middleware::{SessionGateState, require_session};

/// Create the accounts router with PostgreSQL repositories
pub fn accounts_router(
    repo: PgAccountsRepository,
    habit_repo: PgHabitRepository,
    mailer: SmtpMailer,
    config: AccountsConfig,
) -> Router {
    accounts_router_generic(repo, habit_repo, mailer, config)
}

/// Create a generic accounts router for any implementations
pub fn accounts_router_generic<R, H, M>(
    repo: R,
    habit_repo: H,
    mailer: M,
    config: AccountsConfig,
) -> Router
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
    H: HabitRepository + Clone + Send + Sync + 'static,
    M: VerificationMailer + Send + Sync + 'static,
{
    let state = AccountsAppState {
        repo: Arc::new(repo),
        habit_repo: Arc::new(habit_repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    let gate = SessionGateState {
        repo: state.repo.clone(),
        config: state.config.clone(),
    };

    let gated = Router::new()
        .route("/change-password", put(handlers::change_password::<R, H, M>))
        .route("/delete-account", delete(handlers::delete_account::<R, H, M>))
        .layer(middleware::from_fn_with_state(gate, require_session::<R>))
        .with_state(state.clone());

    Router::new()
        .route("/auth", post(handlers::register::<R, H, M>))
        .route("/auth/verify", post(handlers::verify_email::<R, H, M>))
        .route("/auth/check", get(handlers::check_auth::<R, H, M>))
        .route("/login", post(handlers::login::<R, H, M>))
        .route("/logout", post(handlers::logout::<R, H, M>))
        .with_state(state)
        .merge(gated)
}

/// Session gate state for protecting routers outside this crate
pub fn session_gate<R>(repo: Arc<R>, config: Arc<AccountsConfig>) -> SessionGateState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    SessionGateState { repo, config }
}
