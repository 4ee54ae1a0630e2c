//! Add Habit Use Case
//!
//! Persists a new habit under the caller's own account.

use std::sync::Arc;

use crate::domain::entity::Habit;
use crate::domain::repository::HabitRepository;
use crate::error::{HabitError, HabitResult};
use kernel::principal::Principal;

/// Add habit use case
pub struct AddHabitUseCase<H>
where
    H: HabitRepository,
{
    habit_repo: Arc<H>,
}

impl<H> AddHabitUseCase<H>
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

        habit.stamp_owner(&principal.user_id);
        if !habit.has_owner() {
            return Err(HabitError::OwnerRequired);
        }

        self.habit_repo.create(&habit).await?;

        tracing::debug!(
            habit_id = %habit.id,
            user_id = %habit.user_id,
            "Habit created"
        );

        Ok(habit)
    }
}
