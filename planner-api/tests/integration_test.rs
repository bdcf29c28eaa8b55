/// Integration tests for the planner web server
///
/// These drive the full router against an in-memory database:
/// - Signup, login and logout
/// - The session gate
/// - Task add, toggle and delete
/// - Isolation between users

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Duration;
use common::{body_json, cookie_value, location, test_config, TestContext};
use planner_shared::auth::session::{self, create_token, Claims};
use planner_shared::models::{task::Task, user::User};

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_signup_redirects_to_login() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.signup("alice", "pw1").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_duplicate_signup_flashes_message() {
    let ctx = TestContext::new().await.unwrap();
    ctx.signup("alice", "pw1").await;

    let response = ctx.signup("alice", "other").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signup");
    assert_eq!(
        cookie_value(&response, "flash").as_deref(),
        Some("duplicate_username")
    );

    let request = Request::builder()
        .uri("/signup")
        .header(header::COOKIE, "flash=duplicate_username")
        .body(Body::empty())
        .unwrap();
    let page = ctx.send(request).await;

    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(cookie_value(&page, "flash").as_deref(), Some(""));
    let json = body_json(page).await;
    assert_eq!(json["page"], "signup");
    assert_eq!(
        json["message"],
        "Username already exists. Please choose a different one."
    );
}

#[tokio::test]
async fn test_duplicate_signup_with_empty_password() {
    let ctx = TestContext::new().await.unwrap();
    ctx.signup("alice", "pw1").await;

    let response = ctx.post_form("/signup", "username=alice&password=", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signup");
    assert_eq!(
        cookie_value(&response, "flash").as_deref(),
        Some("duplicate_username")
    );
}

#[tokio::test]
async fn test_signup_accepts_empty_password() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.post_form("/signup", "username=bob&password=", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = ctx.post_form("/login", "username=bob&password=", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(cookie_value(&response, "session").is_some());
}

#[tokio::test]
async fn test_empty_signup_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.post_form("/signup", "username=&password=", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_bad_login_is_unauthorized() {
    let ctx = TestContext::new().await.unwrap();
    ctx.signup("alice", "pw1").await;

    for body in ["username=alice&password=wrong", "username=nobody&password=pw1"] {
        let response = ctx.post_form("/login", body, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(cookie_value(&response, "session").is_none());

        let json = body_json(response).await;
        assert_eq!(json["page"], "login");
        assert_eq!(json["message"], "Invalid username or password.");
    }
}

#[tokio::test]
async fn test_protected_routes_redirect_to_login() {
    let ctx = TestContext::new().await.unwrap();

    for path in ["/", "/update/1", "/delete/1", "/logout"] {
        let response = ctx.get(path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), "/login");
        assert_eq!(
            cookie_value(&response, "flash").as_deref(),
            Some("login_required")
        );
    }

    let response = ctx.post_form("/add", "task_content=x", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_forged_session_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/", Some("not-a-token")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(cookie_value(&response, "session").as_deref(), Some(""));
}

#[tokio::test]
async fn test_session_for_missing_user_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let secret = test_config().session.secret;
    let token = session::issue(999, Duration::hours(1), &secret).unwrap();

    let response = ctx.get("/", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(cookie_value(&response, "session").as_deref(), Some(""));
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    ctx.signup("alice", "pw1").await;
    let user = User::find_by_username(&ctx.db, "alice").await.unwrap().unwrap();

    let secret = test_config().session.secret;
    let claims = Claims::with_expiration(user.id, Duration::hours(-2));
    let token = create_token(&claims, &secret).unwrap();

    let response = ctx.get("/", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(cookie_value(&response, "session").as_deref(), Some(""));
}

#[tokio::test]
async fn test_non_integer_task_id_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let session = ctx.signup_and_login("alice", "pw1").await;

    for path in ["/update/abc", "/delete/abc"] {
        let response = ctx.get(path, Some(&session)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn test_add_task_and_stats() {
    let ctx = TestContext::new().await.unwrap();
    let session = ctx.signup_and_login("alice", "pw1").await;

    let response = ctx
        .post_form("/add", "task_content=Buy+milk&category=Daily", Some(&session))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let json = ctx.dashboard(&session).await;
    assert_eq!(json["name"], "alice");
    assert_eq!(json["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(json["tasks"][0]["text"], "Buy milk");
    assert_eq!(json["tasks"][0]["complete"], false);
    assert_eq!(json["stats"]["Daily"]["percent"], 0);

    let id = json["tasks"][0]["id"].as_i64().unwrap();
    let response = ctx.get(&format!("/update/{}", id), Some(&session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let json = ctx.dashboard(&session).await;
    assert_eq!(json["tasks"][0]["complete"], true);
    assert_eq!(json["stats"]["Daily"]["percent"], 100);
    assert_eq!(json["stats"]["Weekly"]["percent"], 0);
    assert_eq!(json["stats"]["Monthly"]["total"], 0);
}

#[tokio::test]
async fn test_add_defaults_and_empty_text() {
    let ctx = TestContext::new().await.unwrap();
    let session = ctx.signup_and_login("alice", "pw1").await;

    ctx.post_form("/add", "task_content=", Some(&session)).await;
    ctx.post_form("/add", "category=Weekly", Some(&session)).await;
    ctx.post_form("/add", "task_content=Stretch", Some(&session)).await;

    let json = ctx.dashboard(&session).await;
    let tasks = json["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["category"], "Daily");
}

#[tokio::test]
async fn test_delete_task() {
    let ctx = TestContext::new().await.unwrap();
    let session = ctx.signup_and_login("alice", "pw1").await;

    ctx.post_form("/add", "task_content=Pay+rent&category=Monthly", Some(&session))
        .await;
    let json = ctx.dashboard(&session).await;
    let id = json["tasks"][0]["id"].as_i64().unwrap();

    let response = ctx.get(&format!("/delete/{}", id), Some(&session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    assert!(Task::find_by_id(&ctx.db, id).await.unwrap().is_none());

    // Deleting again is a silent no-op
    let response = ctx.get(&format!("/delete/{}", id), Some(&session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_users_cannot_see_or_touch_each_others_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let alice = ctx.signup_and_login("alice", "pw1").await;
    let bob = ctx.signup_and_login("bob", "pw2").await;

    ctx.post_form("/add", "task_content=Alice+task", Some(&alice)).await;
    let id = ctx.dashboard(&alice).await["tasks"][0]["id"].as_i64().unwrap();

    let json = ctx.dashboard(&bob).await;
    assert!(json["tasks"].as_array().unwrap().is_empty());
    assert_eq!(json["stats"]["Daily"]["total"], 0);

    let response = ctx.get(&format!("/update/{}", id), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let response = ctx.get(&format!("/delete/{}", id), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let task = Task::find_by_id(&ctx.db, id).await.unwrap().unwrap();
    assert!(!task.complete);
    assert_eq!(task.text, "Alice task");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let ctx = TestContext::new().await.unwrap();
    let session = ctx.signup_and_login("alice", "pw1").await;

    let response = ctx.get("/logout", Some(&session)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(cookie_value(&response, "session").as_deref(), Some(""));
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let ctx = TestContext::new().await.unwrap();

    for response in [ctx.get("/health", None).await, ctx.get("/", None).await] {
        assert_eq!(
            response.headers().get("X-Content-Type-Options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
    }
}
