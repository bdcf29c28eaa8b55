/// Common test utilities for integration tests
///
/// - In-memory database with the schema applied
/// - Router wired to that database
/// - Form posting and cookie helpers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use planner_api::app::{build_router, AppState};
use planner_api::config::{ApiConfig, Config, DbConfig, SessionConfig};
use planner_shared::db::migrations::run_migrations;
use planner_shared::db::pool::{create_pool, DatabaseConfig, IN_MEMORY_URL};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Test context holding the app and its database
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        let db = create_pool(DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), config));

        Ok(TestContext { db, app })
    }

    /// Sends one request through the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// `GET path`, optionally with a session cookie
    pub async fn get(&self, path: &str, session: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("session={}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// `POST path` with a url-encoded form body
    pub async fn post_form(&self, path: &str, body: &str, session: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("session={}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    pub async fn signup(&self, username: &str, password: &str) -> Response {
        self.post_form(
            "/signup",
            &format!("username={}&password={}", username, password),
            None,
        )
        .await
    }

    /// Signs up and logs in, returning the session token
    pub async fn signup_and_login(&self, username: &str, password: &str) -> String {
        let response = self.signup(username, password).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = self
            .post_form(
                "/login",
                &format!("username={}&password={}", username, password),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        cookie_value(&response, "session").expect("login did not set a session cookie")
    }

    /// Fetches the dashboard as JSON
    pub async fn dashboard(&self, session: &str) -> serde_json::Value {
        let response = self.get("/", Some(session)).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            production: false,
        },
        database: DbConfig {
            url: IN_MEMORY_URL.to_string(),
            max_connections: 1,
        },
        session: SessionConfig {
            secret: "integration-test-secret-0123456789abcdef".to_string(),
            ttl_hours: 24,
        },
    }
}

/// Value of the named cookie in the response's `Set-Cookie` headers
pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);

    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.strip_prefix(prefix.as_str()))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .next()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
