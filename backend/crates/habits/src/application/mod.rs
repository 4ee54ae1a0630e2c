//! Application Layer
//!
//! Use cases and application services.

pub mod add_habit;
pub mod delete_habit;
pub mod list_habits;
pub mod sync_habits;
pub mod update_habit;

// Re-exports
pub use add_habit::AddHabitUseCase;
pub use delete_habit::DeleteHabitUseCase;
pub use list_habits::ListHabitsUseCase;
pub use sync_habits::SyncHabitsUseCase;
pub use update_habit::UpdateHabitUseCase;
