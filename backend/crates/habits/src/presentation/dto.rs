//! API DTOs (Data Transfer Objects)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::entity::Habit;
use kernel::id::{HabitId, UserId};

// ============================================================================
// Habit payload
// ============================================================================

/// Habit as submitted by the client
///
/// A `userId` field sent by the client is accepted for wire
/// compatibility but ignored; the owner is always taken from the
/// authenticated session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitPayload {
    pub id: String,
    pub name: String,
    pub template: Vec<bool>,
    pub selected_color: String,
    #[serde(default)]
    pub days: HashMap<String, Vec<u32>>,
    #[serde(default, rename = "userId")]
    pub _user_id: Option<String>,
}

impl HabitPayload {
    /// Convert into a domain habit owned by `owner`
    pub fn into_habit(self, owner: &UserId) -> Habit {
        Habit {
            id: HabitId::from_string(self.id),
            user_id: owner.clone(),
            name: self.name,
            template: self.template,
            selected_color: self.selected_color,
            days: self.days,
        }
    }
}

/// Habit as returned to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDto {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub template: Vec<bool>,
    pub selected_color: String,
    pub days: HashMap<String, Vec<u32>>,
}

impl From<Habit> for HabitDto {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id.into_string(),
            user_id: habit.user_id.into_string(),
            name: habit.name,
            template: habit.template,
            selected_color: habit.selected_color,
            days: habit.days,
        }
    }
}

// ============================================================================
// Sync
// ============================================================================

/// Sync request: the client's full habit list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub habits: Vec<HabitPayload>,
}

/// Sync response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub user_id: String,
}
