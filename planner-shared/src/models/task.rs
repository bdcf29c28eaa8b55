/// Task model and database operations
///
/// A task is a to-do item owned by exactly one user. Every mutating query is
/// scoped by `owner_id`, so a task that belongs to someone else looks exactly
/// like a task that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     text TEXT NOT NULL,
///     complete BOOLEAN NOT NULL DEFAULT 0,
///     category TEXT NOT NULL DEFAULT 'Daily',
///     owner_id INTEGER NOT NULL REFERENCES users(id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use planner_shared::models::task::Task;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool, owner_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// if let Some(task) = Task::add(&pool, owner_id, Some("Buy milk"), Some("Daily")).await? {
///     let toggled = Task::toggle_complete(&pool, task.id, owner_id).await?;
///     assert!(toggled.complete);
/// }
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Category used when a task is added without one
pub const DEFAULT_CATEGORY: &str = "Daily";

/// Error type for owner-gated task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The task does not exist or belongs to another user
    #[error("Task not found")]
    NotFoundOrNotOwned,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,

    /// What needs doing; never empty
    pub text: String,

    pub complete: bool,

    /// Free-form grouping label. Only "Daily", "Weekly" and "Monthly" are
    /// bucketed by the stats calculator.
    pub category: String,

    /// The user this task belongs to. Fixed at creation.
    pub owner_id: i64,
}

impl Task {
    /// Adds a task for `owner_id`
    ///
    /// Returns `Ok(None)` without touching the database when `text` is
    /// missing or empty. A missing category falls back to
    /// [`DEFAULT_CATEGORY`]; any other string is stored as given.
    pub async fn add(
        pool: &SqlitePool,
        owner_id: i64,
        text: Option<&str>,
        category: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error> {
        let text = match text {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(None),
        };

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (text, complete, category, owner_id)
            VALUES (?, 0, ?, ?)
            RETURNING id, text, complete, category, owner_id
            "#,
        )
        .bind(text)
        .bind(category.unwrap_or(DEFAULT_CATEGORY))
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(Some(task))
    }

    /// Finds a task by ID regardless of owner
    ///
    /// Request handlers should go through the owner-scoped operations
    /// instead.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, text, complete, category, owner_id FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Flips the completion flag of a task owned by `owner_id`
    ///
    /// # Errors
    ///
    /// `TaskError::NotFoundOrNotOwned` if no task with this ID belongs to the
    /// caller. The row is left untouched in that case.
    pub async fn toggle_complete(
        pool: &SqlitePool,
        id: i64,
        owner_id: i64,
    ) -> Result<Self, TaskError> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET complete = NOT complete
            WHERE id = ? AND owner_id = ?
            RETURNING id, text, complete, category, owner_id
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFoundOrNotOwned)
    }

    /// Deletes a task owned by `owner_id`
    ///
    /// # Errors
    ///
    /// `TaskError::NotFoundOrNotOwned` if nothing was deleted.
    pub async fn delete(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<(), TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFoundOrNotOwned);
        }

        Ok(())
    }

    /// Lists every task owned by `owner_id` in insertion order
    pub async fn list_by_owner(pool: &SqlitePool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, text, complete, category, owner_id
            FROM tasks
            WHERE owner_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Counts tasks of one owner in one category
    ///
    /// With `complete` set, only tasks in that completion state are counted.
    pub async fn count(
        pool: &SqlitePool,
        owner_id: i64,
        category: &str,
        complete: Option<bool>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = match complete {
            Some(complete) => {
                sqlx::query_as(
                    "SELECT COUNT(*) FROM tasks WHERE owner_id = ? AND category = ? AND complete = ?",
                )
                .bind(owner_id)
                .bind(category)
                .bind(complete)
                .fetch_one(pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE owner_id = ? AND category = ?")
                    .bind(owner_id)
                    .bind(category)
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count)
    }
}
