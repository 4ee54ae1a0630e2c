//! Habit Entity
//!
//! A habit record as the client holds it: an id chosen on the device,
//! a completion template and per-period completion marks. The server
//! adds nothing but the owner stamp.

use std::collections::HashMap;

use kernel::id::{HabitId, UserId};

/// Habit entity
///
/// `user_id` is immutable once set; every write path stamps it from
/// the authenticated principal, never from the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    /// Client-chosen identifier, unique per owner
    pub id: HabitId,
    /// Owning account
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Fixed-length completion template (ordered)
    pub template: Vec<bool>,
    /// Display color selected by the user
    pub selected_color: String,
    /// Period key (e.g. week identifier) -> completion marks
    pub days: HashMap<String, Vec<u32>>,
}

impl Habit {
    /// Replace the owner with the server-trusted principal id.
    pub fn stamp_owner(&mut self, owner: &UserId) {
        self.user_id = owner.clone();
    }

    /// True when the record carries a non-empty owner id.
    pub fn has_owner(&self) -> bool {
        !self.user_id.as_str().is_empty()
    }
}
