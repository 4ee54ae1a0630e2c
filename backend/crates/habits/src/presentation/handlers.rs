//! HTTP Handlers
//!
//! Every route here requires an authenticated session. The session
//! middleware (accounts crate) resolves the cookie and injects a
//! `Principal` extension before these handlers run.

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{
    AddHabitUseCase, DeleteHabitUseCase, ListHabitsUseCase, SyncHabitsUseCase, UpdateHabitUseCase,
};
use crate::domain::repository::HabitRepository;
use crate::error::HabitResult;
use crate::presentation::dto::{HabitDto, HabitPayload, SyncRequest, SyncResponse};
use kernel::id::HabitId;
use kernel::principal::Principal;

/// Shared state for habit handlers
#[derive(Clone)]
pub struct HabitsAppState<H>
where
    H: HabitRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<H>,
}

// ============================================================================
// Add
// ============================================================================

/// POST /habits/add
pub async fn add_habit<H>(
    State(state): State<HabitsAppState<H>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<HabitPayload>,
) -> HabitResult<(StatusCode, Json<HabitDto>)>
where
    H: HabitRepository + Clone + Send + Sync + 'static,
{
    let use_case = AddHabitUseCase::new(state.repo.clone());
    let habit = req.into_habit(&principal.user_id);

    let created = use_case.execute(&principal, habit).await?;

    Ok((StatusCode::CREATED, Json(HabitDto::from(created))))
}

// ============================================================================
// Update
// ============================================================================

/// POST /habits/update
pub async fn update_habit<H>(
    State(state): State<HabitsAppState<H>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<HabitPayload>,
) -> HabitResult<Json<HabitDto>>
where
    H: HabitRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateHabitUseCase::new(state.repo.clone());
    let habit = req.into_habit(&principal.user_id);

    let updated = use_case.execute(&principal, habit).await?;

    Ok(Json(HabitDto::from(updated)))
}

// ============================================================================
// Delete
// ============================================================================

/// DELETE /habits/delete/{id}
pub async fn delete_habit<H>(
    State(state): State<HabitsAppState<H>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> HabitResult<Json<HabitDto>>
where
    H: HabitRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteHabitUseCase::new(state.repo.clone());
    let id = HabitId::from_string(id);

    let deleted = use_case.execute(&principal, &id).await?;

    Ok(Json(HabitDto::from(deleted)))
}

// ============================================================================
// Sync
// ============================================================================

/// POST /habits/sync
pub async fn sync_habits<H>(
    State(state): State<HabitsAppState<H>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<SyncRequest>,
) -> HabitResult<Json<SyncResponse>>
where
    H: HabitRepository + Clone + Send + Sync + 'static,
{
    let use_case = SyncHabitsUseCase::new(state.repo.clone());
    let habits = req
        .habits
        .into_iter()
        .map(|p| p.into_habit(&principal.user_id))
        .collect();

    use_case.execute(&principal, habits).await?;

    Ok(Json(SyncResponse {
        user_id: principal.user_id.as_str().to_string(),
    }))
}

// ============================================================================
// List
// ============================================================================

/// GET /habits
pub async fn list_habits<H>(
    State(state): State<HabitsAppState<H>>,
    Extension(principal): Extension<Principal>,
) -> HabitResult<Json<Vec<HabitDto>>>
where
    H: HabitRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListHabitsUseCase::new(state.repo.clone());

    let habits = use_case.execute(&principal).await?;

    Ok(Json(habits.into_iter().map(HabitDto::from).collect()))
}
