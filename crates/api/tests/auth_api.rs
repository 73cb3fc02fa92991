//! Integration tests for signup, login, and the Bearer-token gate.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_unauthed, post_json_unauthed};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_then_login_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_unauthed(
        app.clone(),
        "/api/v1/auth/signup",
        json!({
            "email": "doctora@example.com",
            "fullName": "Dra. Pérez",
            "password": "hunter2hunter2"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["data"]["email"], "doctora@example.com");
    assert!(
        created["data"].get("passwordHash").is_none(),
        "the password hash must never be serialized"
    );

    let response = post_json_unauthed(
        app,
        "/api/v1/auth/login",
        json!({ "email": "doctora@example.com", "password": "hunter2hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let login = body_json(response).await;
    assert!(login["data"]["accessToken"].is_string());
    assert_eq!(login["data"]["user"]["email"], "doctora@example.com");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_signup_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let payload = json!({
        "email": "doctora@example.com",
        "fullName": "Dra. Pérez",
        "password": "hunter2hunter2"
    });

    let first = post_json_unauthed(app.clone(), "/api/v1/auth/signup", payload.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_unauthed(app, "/api/v1/auth/signup", payload).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_and_unknown_email_look_identical(pool: PgPool) {
    let app = common::build_test_app(pool);

    post_json_unauthed(
        app.clone(),
        "/api/v1/auth/signup",
        json!({
            "email": "doctora@example.com",
            "fullName": "Dra. Pérez",
            "password": "hunter2hunter2"
        }),
    )
    .await;

    let wrong_password = post_json_unauthed(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "doctora@example.com", "password": "wrong-password" }),
    )
    .await;
    let unknown_email = post_json_unauthed(
        app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@example.com", "password": "whatever123" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a["error"], b["error"], "no account-existence leak");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_require_a_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let missing = get_unauthed(app.clone(), "/api/v1/patients").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let authed = get(app, "/api/v1/patients").await;
    assert_eq!(authed.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_unauthed(
        app,
        "/api/v1/auth/signup",
        json!({
            "email": "doctora@example.com",
            "fullName": "Dra. Pérez",
            "password": "short"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
