//! Shared helpers for router-level tests.
//!
//! Every test drives the real router over the in-memory store, so the full
//! middleware and error-mapping stack is exercised without PostgreSQL.

// Each test binary compiles this module independently and uses a subset.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use mnema_api::{app, AppState, AuthConfig};
use mnema_core::{MemWordRepository, NewWord, WordRepository};

/// Fresh router plus a handle on its backing store.
pub fn test_app() -> (Arc<MemWordRepository>, Router) {
    test_app_with_auth(AuthConfig::default())
}

pub fn test_app_with_auth(auth: AuthConfig) -> (Arc<MemWordRepository>, Router) {
    let repo = Arc::new(MemWordRepository::new());
    let state = AppState::new(repo.clone(), auth);
    (repo, app(state))
}

/// Insert plain entries so listing and counter tests have data.
pub async fn seed_words(repo: &MemWordRepository, names: &[&str]) -> Vec<mnema_core::Word> {
    let entries: Vec<NewWord> = names.iter().map(|n| NewWord::named(*n)).collect();
    repo.insert_batch(&entries).await.unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Assert status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
