//! PostgreSQL Repository Implementation
//!
//! Habits live in one table keyed by the composite (user_id, id); the
//! variable-shape fields (template, days) are JSONB columns.

use std::collections::HashMap;

use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entity::Habit;
use crate::domain::repository::HabitRepository;
use crate::error::{HabitError, HabitResult};
use kernel::id::{HabitId, Id, UserId};

/// PostgreSQL-backed habit repository
#[derive(Clone)]
pub struct PgHabitRepository {
    pool: PgPool,
}

impl PgHabitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HabitRepository for PgHabitRepository {
    async fn create(&self, habit: &Habit) -> HabitResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO habits (
                user_id,
                id,
                name,
                template,
                selected_color,
                days
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(habit.user_id.as_str())
        .bind(habit.id.as_str())
        .bind(&habit.name)
        .bind(Json(&habit.template))
        .bind(&habit.selected_color)
        .bind(Json(&habit.days))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(HabitError::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, habit: &Habit) -> HabitResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE habits SET
                name = $3,
                template = $4,
                selected_color = $5,
                days = $6
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(habit.user_id.as_str())
        .bind(habit.id.as_str())
        .bind(&habit.name)
        .bind(Json(&habit.template))
        .bind(&habit.selected_color)
        .bind(Json(&habit.days))
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(HabitError::NotFound);
        }

        Ok(())
    }

    async fn upsert(&self, habit: &Habit) -> HabitResult<()> {
        sqlx::query(
            r#"
            INSERT INTO habits (
                user_id,
                id,
                name,
                template,
                selected_color,
                days
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, id) DO UPDATE SET
                name = EXCLUDED.name,
                template = EXCLUDED.template,
                selected_color = EXCLUDED.selected_color,
                days = EXCLUDED.days
            "#,
        )
        .bind(habit.user_id.as_str())
        .bind(habit.id.as_str())
        .bind(&habit.name)
        .bind(Json(&habit.template))
        .bind(&habit.selected_color)
        .bind(Json(&habit.days))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, owner: &UserId, id: &HabitId) -> HabitResult<Option<Habit>> {
        let row = sqlx::query_as::<_, HabitRow>(
            r#"
            SELECT
                user_id,
                id,
                name,
                template,
                selected_color,
                days
            FROM habits
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(owner.as_str())
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(HabitRow::into_habit))
    }

    async fn find_all_for_owner(&self, owner: &UserId) -> HabitResult<Vec<Habit>> {
        let rows = sqlx::query_as::<_, HabitRow>(
            r#"
            SELECT
                user_id,
                id,
                name,
                template,
                selected_color,
                days
            FROM habits
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HabitRow::into_habit).collect())
    }

    async fn delete(&self, owner: &UserId, id: &HabitId) -> HabitResult<()> {
        let deleted = sqlx::query("DELETE FROM habits WHERE user_id = $1 AND id = $2")
            .bind(owner.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(HabitError::NotFound);
        }

        Ok(())
    }

    async fn delete_all_for_owner(&self, owner: &UserId) -> HabitResult<u64> {
        let deleted = sqlx::query("DELETE FROM habits WHERE user_id = $1")
            .bind(owner.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct HabitRow {
    user_id: String,
    id: String,
    name: String,
    template: Json<Vec<bool>>,
    selected_color: String,
    days: Json<HashMap<String, Vec<u32>>>,
}

impl HabitRow {
    fn into_habit(self) -> Habit {
        Habit {
            id: Id::from_string(self.id),
            user_id: Id::from_string(self.user_id),
            name: self.name,
            template: self.template.0,
            selected_color: self.selected_color,
            days: self.days.0,
        }
    }
}
