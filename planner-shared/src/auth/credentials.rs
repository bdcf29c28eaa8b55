/// Account registration and login checks
///
/// # Example
///
/// ```no_run
/// use planner_shared::auth::credentials::{authenticate, register};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let id = register(&pool, "alice", "pw1").await?;
/// assert_eq!(authenticate(&pool, "alice", "pw1").await?, id);
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::password::{hash_password, verify_password, PasswordError};
use crate::models::user::{CreateUser, User};

/// Error type for credential operations
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Username already exists")]
    DuplicateUsername,

    /// Unknown username or wrong password; deliberately not told apart
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Registers a new account and returns its ID
///
/// The username is checked before insert; a concurrent signup that slips
/// past the check still hits the unique constraint and gets the same error.
pub async fn register(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<i64, CredentialError> {
    if User::find_by_username(pool, username).await?.is_some() {
        debug!(username, "Signup rejected: username taken");
        return Err(CredentialError::DuplicateUsername);
    }

    let password_hash = hash_password(password)?;

    let user = User::create(
        pool,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            CredentialError::DuplicateUsername
        }
        e => CredentialError::Database(e),
    })?;

    info!(user_id = user.id, "User registered");
    Ok(user.id)
}

/// Checks a username/password pair and returns the account ID
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<i64, CredentialError> {
    let user = User::find_by_username(pool, username)
        .await?
        .ok_or(CredentialError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(CredentialError::InvalidCredentials);
    }

    Ok(user.id)
}
