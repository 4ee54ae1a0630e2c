//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::HabitsAppState;
pub use router::{habits_router, habits_router_generic};
