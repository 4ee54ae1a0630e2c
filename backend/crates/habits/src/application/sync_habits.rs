//! Sync Habits Use Case
//!
//! Reconciles a batch of client-held habits into the server store.
//! Each item is an idempotent upsert keyed by (owner, habit id), so the
//! caller can retry a whole batch safely. Items are applied one at a
//! time: a failure leaves a well-defined committed prefix, never a
//! half-written document. The batch is not a transaction.

use std::sync::Arc;

use crate::domain::entity::Habit;
use crate::domain::repository::HabitRepository;
use crate::error::{HabitError, HabitResult};
use kernel::principal::Principal;

/// Sync habits use case
pub struct SyncHabitsUseCase<H>
where
    H: HabitRepository,
{
    habit_repo: Arc<H>,
}

impl<H> SyncHabitsUseCase<H>
where
    H: HabitRepository,
{
    pub fn new(habit_repo: Arc<H>) -> Self {
        Self { habit_repo }
    }

    /// Upsert every habit in the batch under the caller's account.
    ///
    /// Any owner id in the payload is discarded: a client can never
    /// write habits into another user's namespace.
    pub async fn execute(&self, principal: &Principal, habits: Vec<Habit>) -> HabitResult<usize> {
        if habits.is_empty() {
            return Err(HabitError::EmptyBatch);
        }

        let mut applied = 0usize;
        for mut habit in habits {
            if habit.id.as_str().is_empty() {
                return Err(HabitError::IdRequired);
            }
            habit.stamp_owner(&principal.user_id);
            self.habit_repo.upsert(&habit).await?;
            applied += 1;
        }

        tracing::debug!(
            user_id = %principal.user_id,
            applied = applied,
            "Habit batch synced"
        );

        Ok(applied)
    }
}
