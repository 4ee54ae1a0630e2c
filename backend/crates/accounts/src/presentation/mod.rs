//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the session gate middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AccountsAppState;
pub use middleware::{SessionGateState, require_session};
pub use router::{accounts_router, accounts_router_generic, session_gate};
