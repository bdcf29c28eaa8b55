/// Task endpoints
///
/// - `POST /add` - Add a task
/// - `GET /update/:id` - Toggle completion
/// - `GET /delete/:id` - Delete
///
/// All three redirect back to the dashboard. Acting on a task that does not
/// exist or belongs to someone else changes nothing and is not reported.
/// An `:id` that is not an integer matches no task route and is a 404.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Redirect,
    Extension, Form,
};
use planner_shared::{
    auth::middleware::AuthContext,
    models::task::{Task, TaskError},
};
use serde::Deserialize;
use tracing::{debug, info};

/// Add-task form
///
/// Both fields are optional on the wire: a missing or empty
/// `task_content` adds nothing, a missing `category` means "Daily".
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    pub task_content: Option<String>,
    pub category: Option<String>,
}

/// `POST /add`
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Form(form): Form<AddTaskForm>,
) -> ApiResult<Redirect> {
    let added = Task::add(
        &state.db,
        auth.user_id,
        form.task_content.as_deref(),
        form.category.as_deref(),
    )
    .await?;

    match added {
        Some(task) => info!(task_id = task.id, user_id = auth.user_id, category = %task.category, "Task added"),
        None => debug!(user_id = auth.user_id, "Empty task ignored"),
    }

    Ok(Redirect::to("/"))
}

/// Task ID from the path; anything but an integer is not found
fn task_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        debug!(error = %rejection, "Unparseable task ID");
        ApiError::NotFound("Task not found".to_string())
    })
}

/// `GET /update/:id`
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Redirect> {
    let id = task_id(path)?;

    match Task::toggle_complete(&state.db, id, auth.user_id).await {
        Ok(task) => debug!(task_id = task.id, complete = task.complete, "Task toggled"),
        Err(TaskError::NotFoundOrNotOwned) => {
            debug!(task_id = id, user_id = auth.user_id, "Toggle ignored: task not found or not owned")
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// `GET /delete/:id`
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Redirect> {
    let id = task_id(path)?;

    match Task::delete(&state.db, id, auth.user_id).await {
        Ok(()) => info!(task_id = id, user_id = auth.user_id, "Task deleted"),
        Err(TaskError::NotFoundOrNotOwned) => {
            debug!(task_id = id, user_id = auth.user_id, "Delete ignored: task not found or not owned")
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}
