//! Authenticated Principal
//!
//! The identity bound to a verified session, passed by value into every
//! owner-scoped operation. Repositories never reach into ambient
//! request state; the session gate resolves the principal once and
//! downstream code receives it explicitly.

use crate::id::UserId;

/// The authenticated account behind a request.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
