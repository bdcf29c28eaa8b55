/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`credentials`]: signup and login checks against the users table
/// - [`session`]: signed session tokens
/// - [`middleware`]: cookie helpers and the per-request [`middleware::AuthContext`]
///
/// # Example
///
/// ```no_run
/// use planner_shared::auth::{credentials, session};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = credentials::authenticate(&pool, "alice", "pw1").await?;
/// let token = session::issue(user_id, session::default_ttl(), "your-secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod credentials;
pub mod session;
pub mod middleware;
