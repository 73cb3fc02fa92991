use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use alinea_api::auth::jwt::{generate_access_token, JwtConfig};
use alinea_api::config::ServerConfig;
use alinea_api::router::build_app_router;
use alinea_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        public_url: "http://localhost:3001".to_string(),
        uploads_dir: std::env::temp_dir()
            .join("alinea-test-uploads")
            .to_string_lossy()
            .into_owned(),
        reminder_check_interval_secs: 3600,
        todoist_sync_interval_secs: 300,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_hours: 8,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack. The Todoist client is left
/// unconfigured; appointment tests cover the unmirrored path.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        todoist: None,
    };
    build_app_router(state, &config)
}

/// Mint a Bearer token accepted by [`build_test_app`]'s auth extractor.
pub fn auth_token() -> String {
    generate_access_token(1, "tester@example.com", &test_config().jwt)
        .expect("token generation should not fail")
}

/// Create the first account of a fresh database, so tokens minted by
/// [`auth_token`] (sub = 1) reference a real user row.
pub async fn seed_user(app: Router) {
    let response = post_json_unauthed(
        app,
        "/api/v1/auth/signup",
        serde_json::json!({
            "email": "tester@example.com",
            "fullName": "Test Account",
            "password": "hunter2hunter2"
        }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201, "seed signup must succeed");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", auth_token()))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_unauthed(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, "PATCH", uri, body).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {}", auth_token()))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", auth_token()))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated JSON POST, for the public auth endpoints.
pub async fn post_json_unauthed(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
