//! List Habits Use Case

use std::sync::Arc;

use crate::domain::entity::Habit;
use crate::domain::repository::HabitRepository;
use crate::error::HabitResult;
use kernel::principal::Principal;

/// List habits use case
pub struct ListHabitsUseCase<H>
where
    H: HabitRepository,
{
    habit_repo: Arc<H>,
}

impl<H> ListHabitsUseCase<H>
where
    H: HabitRepository,
{
    pub fn new(habit_repo: Arc<H>) -> Self {
        Self { habit_repo }
    }

    /// Every habit the caller owns; an empty list is a normal result.
    pub async fn execute(&self, principal: &Principal) -> HabitResult<Vec<Habit>> {
        self.habit_repo.find_all_for_owner(&principal.user_id).await
    }
}
