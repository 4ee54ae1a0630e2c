//! Habits Backend Module
//!
//! Storage and synchronization of per-user habit records.
//!
//! Clean Architecture structure:
//! - `domain/` - Habit entity and repository trait
//! - `application/` - Use cases (CRUD + client/server sync)
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Ownership Model
//! Every operation is owner-scoped: the caller's authenticated
//! principal is stamped onto each record, and client-supplied owner
//! fields are never trusted. Habit ids are chosen by the client and
//! unique per owner (composite storage key).

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::entity::Habit;
pub use domain::repository::HabitRepository;
pub use error::{HabitError, HabitResult};
pub use infra::memory::InMemoryHabitRepository;
pub use infra::postgres::PgHabitRepository;
pub use presentation::router::habits_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgHabitRepository as HabitStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
