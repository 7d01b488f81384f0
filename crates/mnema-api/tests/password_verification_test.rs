//! Shared-secret password check on `/api/v1/verifyPassword`.

mod helpers;

use axum::http::StatusCode;
use helpers::{expect_json, post_json, test_app, test_app_with_auth};
use mnema_api::AuthConfig;
use serde_json::json;

fn configured_auth() -> AuthConfig {
    AuthConfig {
        password: Some("open-sesame".to_string()),
        token: Some("static-test-token".to_string()),
    }
}

#[tokio::test]
async fn test_correct_password_returns_token() {
    let (_repo, router) = test_app_with_auth(configured_auth());

    let response = post_json(
        &router,
        "/api/v1/verifyPassword",
        json!({"password": "open-sesame"}),
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Password verified");
    assert_eq!(body["token"], "static-test-token");
}

#[tokio::test]
async fn test_wrong_password_is_401() {
    let (_repo, router) = test_app_with_auth(configured_auth());

    let response = post_json(
        &router,
        "/api/v1/verifyPassword",
        json!({"password": "guess"}),
    )
    .await;

    let body = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert!(body["error"].as_str().unwrap().contains("wrong password"));
}

#[tokio::test]
async fn test_missing_password_is_400() {
    let (_repo, router) = test_app_with_auth(configured_auth());

    let response = post_json(&router, "/api/v1/verifyPassword", json!({})).await;

    expect_json(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_empty_password_is_400() {
    let (_repo, router) = test_app_with_auth(configured_auth());

    let response = post_json(&router, "/api/v1/verifyPassword", json!({"password": ""})).await;

    expect_json(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_unconfigured_password_rejects_every_attempt() {
    let (_repo, router) = test_app();

    let response = post_json(
        &router,
        "/api/v1/verifyPassword",
        json!({"password": "anything"}),
    )
    .await;

    let body = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

#[tokio::test]
async fn test_token_defaults_to_empty_when_unset() {
    let (_repo, router) = test_app_with_auth(AuthConfig {
        password: Some("open-sesame".to_string()),
        token: None,
    });

    let response = post_json(
        &router,
        "/api/v1/verifyPassword",
        json!({"password": "open-sesame"}),
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["token"], "");
}
