/// Application state and router builder
///
/// This module defines the shared application state, the session gate that
/// protects task routes, and the function that assembles the Axum router.
///
/// # Example
///
/// ```no_run
/// use planner_api::{app::{build_router, AppState}, config::Config};
/// use planner_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let app = build_router(AppState::new(pool, config));
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    error::ApiError,
    flash::{self, Flash},
    middleware::security::{security_headers, SecurityPolicy},
};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use chrono::Duration;
use planner_shared::{
    auth::{
        middleware::{expire_cookie, read_cookie, AuthContext, SESSION_COOKIE},
        session,
    },
    models::user::User,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{debug, Level};

/// Where anonymous visitors are sent
pub const LOGIN_PATH: &str = "/login";

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Key for signing and checking session tokens
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }

    pub fn session_ttl(&self) -> Duration {
        self.config.session_ttl()
    }

    /// Whether cookies must carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.config.api.production
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health          # Health check (public)
/// ├── GET  /signup          # Signup page (public)
/// ├── POST /signup          # Register
/// ├── GET  /login           # Login page (public)
/// ├── POST /login           # Start a session
/// └── (session required)
///     ├── GET  /            # Dashboard: tasks, stats, greeting
///     ├── POST /add         # Add a task
///     ├── GET  /update/:id  # Toggle completion
///     ├── GET  /delete/:id  # Delete
///     └── GET  /logout      # End the session
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Security headers
/// 2. Logging (tower-http TraceLayer)
/// 3. Session gate (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/signup",
            get(routes::auth::signup_page).post(routes::auth::signup),
        )
        .route(
            LOGIN_PATH,
            get(routes::auth::login_page).post(routes::auth::login),
        );

    let protected_routes = Router::new()
        .route("/", get(routes::dashboard::index))
        .route("/add", post(routes::tasks::add))
        .route("/update/:id", get(routes::tasks::update))
        .route("/delete/:id", get(routes::tasks::delete))
        .route("/logout", get(routes::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(axum::middleware::from_fn_with_state(
            SecurityPolicy::new(state.config.api.production),
            security_headers,
        ))
        .with_state(state)
}

/// Session gate
///
/// Resolves the `session` cookie to a user and injects [`AuthContext`] into
/// the request extensions. Anything short of a valid token for an existing
/// user is sent to the login page instead of reaching the handler.
async fn session_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = match read_cookie(req.headers(), SESSION_COOKIE) {
        Some(token) => session::validate_token(token, state.session_secret()),
        None => {
            debug!(path = %req.uri().path(), "No session, redirecting to login");
            return Ok(redirect_to_login(false));
        }
    };

    let user_id = match claims.and_then(|claims| claims.user_id()) {
        Ok(user_id) => user_id,
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            return Ok(redirect_to_login(true));
        }
    };

    let Some(user) = User::find_by_id(&state.db, user_id).await? else {
        debug!(user_id, "Session names a user that no longer exists");
        return Ok(redirect_to_login(true));
    };

    req.extensions_mut().insert(AuthContext::from_user(&user));

    Ok(next.run(req).await)
}

/// Redirect to the login page, optionally dropping a stale session cookie
fn redirect_to_login(clear_session: bool) -> Response {
    let mut response = (flash::set(Flash::LoginRequired), Redirect::to(LOGIN_PATH)).into_response();

    if clear_session {
        if let Some(cookie) = expire_cookie(SESSION_COOKIE) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }

    response
}
