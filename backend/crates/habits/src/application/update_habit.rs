//! Update Habit Use Case
//!
//! Full-document replace of one habit owned by the caller.

use std::sync::Arc;

use crate::domain::entity::Habit;
use crate::domain::repository::HabitRepository;
use crate::error::{HabitError, HabitResult};
use kernel::principal::Principal;

/// Update habit use case
pub struct UpdateHabitUseCase<H>
where
    H: HabitRepository,
{
    habit_repo: Arc<H>,
}

impl<H> UpdateHabitUseCase<H>
where
    H: HabitRepository,
{
    pub fn new(habit_repo: Arc<H>) -> Self {
        Self { habit_repo }
    }

    pub async fn execute(&self, principal: &Principal, mut habit: Habit) -> HabitResult<Habit> {
        if habit.id.as_str().is_empty() {
            return Err(HabitError::IdRequired);
        }

        // Owner scoping doubles as authorization: an id belonging to a
        // different account resolves to NotFound, never to a write.
        habit.stamp_owner(&principal.user_id);

        self.habit_repo.update(&habit).await?;

        tracing::debug!(
            habit_id = %habit.id,
            user_id = %habit.user_id,
            "Habit updated"
        );

        Ok(habit)
    }
}
