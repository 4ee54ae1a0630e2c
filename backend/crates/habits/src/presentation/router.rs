//! Habits Router
//!
//! The router carries no session handling of its own; the caller is
//! expected to layer the session middleware on top so that every route
//! sees a `Principal` extension.

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::domain::repository::HabitRepository;
use crate::infra::postgres::PgHabitRepository;
use crate::presentation::handlers::{self, HabitsAppState};

/// Create the habits router with PostgreSQL repository
pub fn habits_router(repo: PgHabitRepository) -> Router {
    habits_router_generic(repo)
}

/// Create a generic habits router for any repository implementation
pub fn habits_router_generic<H>(repo: H) -> Router
where
    H: HabitRepository + Clone + Send + Sync + 'static,
{
    let state = HabitsAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/habits", get(handlers::list_habits::<H>))
        .route("/habits/add", post(handlers::add_habit::<H>))
        .route("/habits/update", post(handlers::update_habit::<H>))
        .route("/habits/delete/{id}", delete(handlers::delete_habit::<H>))
        .route("/habits/sync", post(handlers::sync_habits::<H>))
        .with_state(state)
}
