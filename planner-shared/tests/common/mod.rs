/// Shared helpers for the planner-shared integration tests

use planner_shared::auth::credentials;
use planner_shared::db::migrations::run_migrations;
use planner_shared::db::pool::{create_pool, DatabaseConfig};
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");
    run_migrations(&pool).await.expect("Migrations failed");
    pool
}

/// Registers a user and returns its ID
#[allow(dead_code)]
pub async fn create_user(pool: &SqlitePool, username: &str) -> i64 {
    credentials::register(pool, username, "pw1")
        .await
        .expect("Failed to register test user")
}
