//! Repository Trait
//!
//! Persistence port for habit records. Implementations live in the
//! infrastructure layer; all lookups are scoped by owner.

use crate::domain::entity::Habit;
use crate::error::HabitResult;
use kernel::id::{HabitId, UserId};

/// Habit repository trait
#[trait_variant::make(HabitRepository: Send)]
pub trait LocalHabitRepository {
    /// Create a new habit; fails with `AlreadyExists` on a duplicate key
    async fn create(&self, habit: &Habit) -> HabitResult<()>;

    /// Full-document replace; fails with `NotFound` when absent (no upsert)
    async fn update(&self, habit: &Habit) -> HabitResult<()>;

    /// Create-if-absent, replace-if-present, keyed by (owner, id)
    async fn upsert(&self, habit: &Habit) -> HabitResult<()>;

    /// Find one habit of this owner
    async fn find_by_id(&self, owner: &UserId, id: &HabitId) -> HabitResult<Option<Habit>>;

    /// All habits of this owner; empty vec when none exist
    async fn find_all_for_owner(&self, owner: &UserId) -> HabitResult<Vec<Habit>>;

    /// Delete one habit of this owner; fails with `NotFound` when absent
    async fn delete(&self, owner: &UserId, id: &HabitId) -> HabitResult<()>;

    /// Bulk-delete everything this owner has; no-op when nothing exists
    async fn delete_all_for_owner(&self, owner: &UserId) -> HabitResult<u64>;
}
