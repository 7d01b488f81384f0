//! postWords behavior: batched deduplicating insert over the router.

mod helpers;

use axum::http::StatusCode;
use helpers::{expect_json, post_json, seed_words, test_app};
use mnema_core::WordRepository;
use serde_json::json;

#[tokio::test]
async fn test_post_words_inserts_batch() {
    let (repo, router) = test_app();

    let response = post_json(
        &router,
        "/api/v1/postWords",
        json!({"words": [{"word": "ephemeral"}, {"word": "sonder"}]}),
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["message"], "2 words added");
    assert_eq!(body["addedWords"].as_array().unwrap().len(), 2);
    assert!(body["skippedWords"].as_array().unwrap().is_empty());
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_post_words_skips_existing_name_any_case() {
    let (repo, router) = test_app();
    seed_words(&repo, &["ephemeral"]).await;

    let response = post_json(
        &router,
        "/api/v1/postWords",
        json!({"words": [{"word": "EPHEMERAL"}, {"word": "sonder"}]}),
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["addedWords"].as_array().unwrap().len(), 1);
    assert_eq!(body["addedWords"][0]["word"], "sonder");
    assert_eq!(body["skippedWords"], json!(["EPHEMERAL"]));
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_post_words_all_duplicates_is_400_with_skipped_list() {
    let (repo, router) = test_app();
    seed_words(&repo, &["ephemeral", "sonder"]).await;

    let response = post_json(
        &router,
        "/api/v1/postWords",
        json!({"words": [{"word": "Ephemeral"}, {"word": "SONDER"}]}),
    )
    .await;

    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["skippedWords"], json!(["Ephemeral", "SONDER"]));
    assert!(body["error"].as_str().unwrap().contains("already exist"));
    // Store unchanged
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_post_words_empty_array_is_400() {
    let (repo, router) = test_app();

    let response = post_json(&router, "/api/v1/postWords", json!({"words": []})).await;

    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert!(body["error"].as_str().unwrap().contains("non-empty"));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_post_words_missing_words_key_is_400() {
    let (_repo, router) = test_app();

    let response = post_json(&router, "/api/v1/postWords", json!({"word": "alone"})).await;

    expect_json(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_post_words_non_array_words_is_400() {
    let (_repo, router) = test_app();

    let response = post_json(&router, "/api/v1/postWords", json!({"words": "ephemeral"})).await;

    expect_json(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_post_words_blank_name_is_400() {
    let (repo, router) = test_app();

    let response = post_json(
        &router,
        "/api/v1/postWords",
        json!({"words": [{"word": "valid"}, {"word": "   "}]}),
    )
    .await;

    expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_post_words_carries_optional_fields_through() {
    let (_repo, router) = test_app();

    let response = post_json(
        &router,
        "/api/v1/postWords",
        json!({"words": [{
            "word": "petrichor",
            "pronunciation": "PET-ri-kor",
            "meaning": [{"meaning": "rain smell", "example": "petrichor rose from the soil"}],
            "synonyms": ["geosmin scent"]
        }]}),
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    let added = &body["addedWords"][0];
    assert_eq!(added["pronunciation"], "PET-ri-kor");
    assert_eq!(added["meaning"][0]["meaning"], "rain smell");
    assert_eq!(added["no_of_times_opened"], 0);
    assert!(added["createdAt"].is_string());
}
