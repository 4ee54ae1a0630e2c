//! In-Memory Repository Implementation
//!
//! HashMap-backed store keyed by (owner, habit id). Used by the
//! use-case tests and as the development fallback when no database is
//! configured.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::Habit;
use crate::domain::repository::HabitRepository;
use crate::error::{HabitError, HabitResult};
use kernel::id::{HabitId, UserId};

type Key = (String, String);

/// In-memory habit repository
#[derive(Clone, Default)]
pub struct InMemoryHabitRepository {
    habits: Arc<RwLock<HashMap<Key, Habit>>>,
}

impl InMemoryHabitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(owner: &UserId, id: &HabitId) -> Key {
        (owner.as_str().to_string(), id.as_str().to_string())
    }
}

impl HabitRepository for InMemoryHabitRepository {
    async fn create(&self, habit: &Habit) -> HabitResult<()> {
        let mut habits = self.habits.write().await;
        let key = Self::key(&habit.user_id, &habit.id);

        if habits.contains_key(&key) {
            return Err(HabitError::AlreadyExists);
        }

        habits.insert(key, habit.clone());
        Ok(())
    }

    async fn update(&self, habit: &Habit) -> HabitResult<()> {
        let mut habits = self.habits.write().await;
        let key = Self::key(&habit.user_id, &habit.id);

        match habits.get_mut(&key) {
            Some(existing) => {
                *existing = habit.clone();
                Ok(())
            }
            None => Err(HabitError::NotFound),
        }
    }

    async fn upsert(&self, habit: &Habit) -> HabitResult<()> {
        let mut habits = self.habits.write().await;
        habits.insert(Self::key(&habit.user_id, &habit.id), habit.clone());
        Ok(())
    }

    async fn find_by_id(&self, owner: &UserId, id: &HabitId) -> HabitResult<Option<Habit>> {
        let habits = self.habits.read().await;
        Ok(habits.get(&Self::key(owner, id)).cloned())
    }

    async fn find_all_for_owner(&self, owner: &UserId) -> HabitResult<Vec<Habit>> {
        let habits = self.habits.read().await;
        let mut owned: Vec<Habit> = habits
            .values()
            .filter(|h| h.user_id == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(owned)
    }

    async fn delete(&self, owner: &UserId, id: &HabitId) -> HabitResult<()> {
        let mut habits = self.habits.write().await;
        match habits.remove(&Self::key(owner, id)) {
            Some(_) => Ok(()),
            None => Err(HabitError::NotFound),
        }
    }

    async fn delete_all_for_owner(&self, owner: &UserId) -> HabitResult<u64> {
        let mut habits = self.habits.write().await;
        let before = habits.len();
        habits.retain(|(owner_key, _), _| owner_key != owner.as_str());
        Ok((before - habits.len()) as u64)
    }
}
