//! Delete Habit Use Case
//!
//! Removes one habit owned by the caller and returns the removed
//! record for the response body.

use std::sync::Arc;

use crate::domain::entity::Habit;
use crate::domain::repository::HabitRepository;
use crate::error::{HabitError, HabitResult};
use kernel::id::HabitId;
use kernel::principal::Principal;

/// Delete habit use case
pub struct DeleteHabitUseCase<H>
where
    H: HabitRepository,
{
    habit_repo: Arc<H>,
}

impl<H> DeleteHabitUseCase<H>
where
    H: HabitRepository,
{
    pub fn new(habit_repo: Arc<H>) -> Self {
        Self { habit_repo }
    }

    pub async fn execute(&self, principal: &Principal, id: &HabitId) -> HabitResult<Habit> {
        let habit = self
            .habit_repo
            .find_by_id(&principal.user_id, id)
            .await?
            .ok_or(HabitError::NotFound)?;

        self.habit_repo.delete(&principal.user_id, id).await?;

        tracing::debug!(
            habit_id = %id,
            user_id = %principal.user_id,
            "Habit deleted"
        );

        Ok(habit)
    }
}
