/// Dashboard endpoint
///
/// `GET /` renders the signed-in user's task list with per-category
/// completion stats and a time-of-day greeting.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use chrono::{Local, Timelike};
use planner_shared::{
    auth::middleware::AuthContext,
    models::task::Task,
    stats::CategoryStats,
};
use serde::Serialize;

/// View model for the dashboard page
#[derive(Debug, Serialize)]
pub struct DashboardView {
    /// Username of the signed-in user
    pub name: String,

    pub greeting: &'static str,

    /// The user's tasks in insertion order
    pub tasks: Vec<Task>,

    /// Keyed by "Daily", "Weekly" and "Monthly"
    pub stats: CategoryStats,
}

/// Greeting for a local wall-clock hour (0-23)
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

pub async fn index(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DashboardView>> {
    let tasks = Task::list_by_owner(&state.db, auth.user_id).await?;
    let stats = CategoryStats::for_owner(&state.db, auth.user_id).await?;

    Ok(Json(DashboardView {
        name: auth.username,
        greeting: greeting_for_hour(Local::now().hour()),
        tasks,
        stats,
    }))
}
