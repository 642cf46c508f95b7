//! Shared helpers for the HTTP integration tests.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use senpai_api::auth::delivery::{MemoryOutbox, OtpDelivery};
use senpai_api::auth::jwt::JwtConfig;
use senpai_api::auth::password::hash_password;
use senpai_api::config::ServerConfig;
use senpai_api::router::build_app_router;
use senpai_api::state::AppState;
use senpai_core::otp;
use senpai_db::models::user::{CreateUser, User};
use senpai_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        otp_expiry_mins: 10,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 120,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// with codes delivered to a throwaway outbox.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_delivery(pool, Arc::new(MemoryOutbox::new()))
}

/// Build the application router, keeping a handle on the outbox so tests can
/// read the codes a user would have received.
pub fn build_test_app_with_outbox(pool: PgPool, outbox: Arc<MemoryOutbox>) -> Router {
    build_test_app_with_delivery(pool, outbox)
}

pub fn build_test_app_with_delivery(pool: PgPool, delivery: Arc<dyn OtpDelivery>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        otp_delivery: delivery,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a verified user with [`TEST_PASSWORD`] directly through the repository.
pub async fn create_verified_user(pool: &PgPool, email: &str, username: &str) -> User {
    let issued = otp::issue(Utc::now(), 10);
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            username: username.to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            otp_hash: issued.hash,
            otp_expires_at: issued.expires_at,
        },
    )
    .await
    .expect("user creation should succeed");
    UserRepo::mark_verified(pool, user.id)
        .await
        .expect("verification should succeed");
    user
}

/// Log in through the API and return the bearer token.
pub async fn login_token(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("login response must contain a token")
        .to_string()
}

/// Create a verified user and return an app plus a valid token for them.
pub async fn app_with_user(pool: PgPool, email: &str) -> (Router, User, String) {
    let user = create_verified_user(&pool, email, "senpai").await;
    let app = build_test_app(pool);
    let token = login_token(app.clone(), email, TEST_PASSWORD).await;
    (app, user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
