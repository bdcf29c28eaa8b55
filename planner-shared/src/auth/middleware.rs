/// Request-side session plumbing
///
/// The API's auth gate resolves a session cookie into an [`AuthContext`] and
/// stores it in the request extensions. Handlers take it with Axum's
/// `Extension` extractor instead of reaching for a global "current user".
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use planner_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.username)
/// }
/// ```

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Cookie that carries the session token
pub const SESSION_COOKIE: &str = "session";

/// The authenticated user behind the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
}

impl AuthContext {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Reads a cookie value from the `Cookie` request headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Builds a `Set-Cookie` value for an `HttpOnly` cookie scoped to the whole site
///
/// Returns `None` if `value` contains bytes not allowed in a header.
pub fn build_cookie(name: &str, value: &str, max_age: Duration, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name,
        value,
        max_age.num_seconds().max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie).ok()
}

/// Builds a `Set-Cookie` value that deletes the named cookie
///
/// Returns `None` if `name` contains bytes not allowed in a header.
pub fn expire_cookie(name: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        name
    ))
    .ok()
}
