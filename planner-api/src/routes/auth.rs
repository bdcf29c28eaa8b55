/// Account endpoints
///
/// - `GET/POST /signup` - Create an account
/// - `GET/POST /login` - Start a session
/// - `GET /logout` - End the session
///
/// Forms are submitted as `application/x-www-form-urlencoded`. Successful
/// submissions answer with `303 See Other` so a browser reload does not
/// repost the form.

use crate::{
    app::{AppState, LOGIN_PATH},
    error::{ApiError, ApiResult, INVALID_LOGIN_MESSAGE},
    flash::{self, Flash},
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use planner_shared::auth::{
    credentials::{self, CredentialError},
    middleware::{build_cookie, expire_cookie, AuthContext, SESSION_COOKIE},
    session,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

/// Signup and login form
///
/// Passwords are accepted as given, empty included.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Username must be 1 to 100 characters"))]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// View model for the signup and login pages
#[derive(Debug, Serialize)]
pub struct AuthPageView {
    pub page: &'static str,

    /// Pending flash message, shown once
    pub message: Option<&'static str>,
}

fn auth_page(page: &'static str, headers: &HeaderMap) -> Response {
    let view = Json(AuthPageView {
        page,
        message: flash::peek(headers).map(|f| f.message()),
    });

    if flash::is_pending(headers) {
        (flash::clear(), view).into_response()
    } else {
        view.into_response()
    }
}

/// `GET /signup`
pub async fn signup_page(headers: HeaderMap) -> Response {
    auth_page("signup", &headers)
}

/// `GET /login`
pub async fn login_page(headers: HeaderMap) -> Response {
    auth_page("login", &headers)
}

/// Register a new account
///
/// # Endpoint
///
/// ```text
/// POST /signup
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=pw1
/// ```
///
/// # Responses
///
/// - `303 → /login`: account created
/// - `303 → /signup` with a flash message: username taken
/// - `422 Unprocessable Entity`: empty or overlong username
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<Response> {
    form.validate().map_err(ApiError::from_validation)?;

    match credentials::register(&state.db, &form.username, &form.password).await {
        Ok(user_id) => {
            info!(user_id, "Signup succeeded");
            Ok(Redirect::to(LOGIN_PATH).into_response())
        }
        Err(CredentialError::DuplicateUsername) => {
            Ok((flash::set(Flash::DuplicateUsername), Redirect::to("/signup")).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Log in
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=pw1
/// ```
///
/// # Responses
///
/// - `303 → /` with a `session` cookie: credentials accepted
/// - `401 Unauthorized` with the login view: "Invalid username or
///   password." for an unknown user and for a wrong password alike
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<Response> {
    let user_id = match credentials::authenticate(&state.db, &form.username, &form.password).await {
        Ok(user_id) => user_id,
        Err(CredentialError::InvalidCredentials) => {
            debug!("Login rejected");
            let view = AuthPageView {
                page: "login",
                message: Some(INVALID_LOGIN_MESSAGE),
            };
            return Ok((StatusCode::UNAUTHORIZED, Json(view)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let ttl = state.session_ttl();
    let token = session::issue(user_id, ttl, state.session_secret())?;
    let cookie = build_cookie(SESSION_COOKIE, &token, ttl, state.secure_cookies())
        .ok_or_else(|| ApiError::InternalError("Session token is not a valid cookie".to_string()))?;

    info!(user_id, "User logged in");

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

/// `GET /logout`
pub async fn logout(Extension(auth): Extension<AuthContext>) -> Response {
    info!(user_id = auth.user_id, "User logged out");

    (
        AppendHeaders(expire_cookie(SESSION_COOKIE).map(|c| (header::SET_COOKIE, c))),
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}
