use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::AuthUser;
use crate::dto::{StreakQuery, StreakResponse, StreakSummary};
use crate::error::{AppError, AppResult};
use crate::extract::AppQuery;
use crate::models::Habit;
use crate::services::{streak, Collection};
use crate::AppState;

const DEFAULT_GRID_DAYS: u32 = 7;

/// Current streak and recent completion grid for one habit.
pub async fn get_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<String>,
    AppQuery(query): AppQuery<StreakQuery>,
) -> AppResult<Json<StreakResponse>> {
    query.validate()?;

    let habit = Collection::<Habit>::new(state.store.clone(), &auth_user.id)
        .list()
        .await?
        .into_iter()
        .find(|h| h.id == habit_id)
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let days = query.days.unwrap_or(DEFAULT_GRID_DAYS);
    let grid = streak::last_n_days(&habit.completed_dates, today, days).ok_or_else(|| {
        AppError::Validation("today is out of range for the requested days".into())
    })?;

    Ok(Json(StreakResponse {
        streak: StreakSummary {
            current_streak: streak::current_streak(&habit.completed_dates, today),
            completed_today: streak::is_completed_today(&habit.completed_dates, today),
            total_completions: habit.total_completions(),
            days: grid,
            habit_id: habit.id,
        },
    }))
}
