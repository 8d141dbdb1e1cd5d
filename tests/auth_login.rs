mod test_support;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_support::{PASSWORD, spawn_app};

#[tokio::test]
async fn seeded_accounts_can_log_in() {
    let app = spawn_app().await;

    let response = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "teacher", "password": PASSWORD })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "Bearer");
    assert_eq!(response.body["role"], "teacher");
    assert_eq!(response.body["full_name"], "Петров Иван Сергеевич");
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "registrar", "password": "nope" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": "ghost", "password": PASSWORD })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn pages_require_a_token() {
    let app = spawn_app().await;

    let response = app.send("GET", "/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let garbage = app.get("/", "not-a-jwt").await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn home_lists_sections_for_role() {
    let app = spawn_app().await;
    let token = app.directorate().await;

    let response = app.get("/", &token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "directorate");
    assert!(response.body["sections"].as_array().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn health_is_public() {
    let app = spawn_app().await;
    let response = app.send("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}
