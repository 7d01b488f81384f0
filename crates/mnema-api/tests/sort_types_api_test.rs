//! getWordsByType and getWordSortingTypes behavior.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use helpers::{expect_json, get, seed_words, test_app};
use mnema_api::{app, AppState, AuthConfig};
use mnema_core::{
    CounterField, CounterUpdate, EnrichmentRecord, NewWord, Pagination, Result, SortSpec, SortType,
    Word, WordRepository,
};
use uuid::Uuid;

/// Store that panics on any access. Routes that must validate before
/// querying are run against this.
struct UntouchableRepository;

#[async_trait]
impl WordRepository for UntouchableRepository {
    async fn insert_batch(&self, _entries: &[NewWord]) -> Result<Vec<Word>> {
        panic!("store was touched");
    }
    async fn find_existing_names(&self, _folded_names: &[String]) -> Result<Vec<String>> {
        panic!("store was touched");
    }
    async fn fetch(&self, _id: Uuid) -> Result<Word> {
        panic!("store was touched");
    }
    async fn find_by_name(&self, _name: &str) -> Result<Option<Word>> {
        panic!("store was touched");
    }
    async fn list(&self, _sort: SortSpec, _page: Pagination) -> Result<(Vec<Word>, i64)> {
        panic!("store was touched");
    }
    async fn filter_substring(&self, _fragment: &str) -> Result<Vec<Word>> {
        panic!("store was touched");
    }
    async fn adjust_counter(
        &self,
        _id: Uuid,
        _field: CounterField,
        _delta: i64,
    ) -> Result<CounterUpdate> {
        panic!("store was touched");
    }
    async fn apply_enrichment(&self, _record: &EnrichmentRecord) -> Result<bool> {
        panic!("store was touched");
    }
    async fn list_missing_mnemonic(&self, _limit: i64) -> Result<Vec<Word>> {
        panic!("store was touched");
    }
    async fn count(&self) -> Result<i64> {
        panic!("store was touched");
    }
}

fn untouchable_app() -> axum::Router {
    app(AppState::new(
        Arc::new(UntouchableRepository),
        AuthConfig::default(),
    ))
}

#[tokio::test]
async fn test_unknown_sort_type_is_400_and_never_queries() {
    let router = untouchable_app();

    let response = get(&router, "/api/v1/getWordsByType?type=fastest&limit=10&page=1").await;

    let body = expect_json(response, StatusCode::BAD_REQUEST).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("fastest"));
    for sort_type in SortType::ALL {
        assert!(
            message.contains(sort_type.token()),
            "error should list {}",
            sort_type.token()
        );
    }
}

#[tokio::test]
async fn test_bad_pagination_never_queries() {
    let router = untouchable_app();

    let response = get(
        &router,
        "/api/v1/getWordsByType?type=alphabetical&limit=0&page=1",
    )
    .await;

    expect_json(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_alphabetical_order_with_id_tie_break() {
    let (repo, router) = test_app();
    seed_words(&repo, &["mango", "apple", "zebra", "apple"]).await;

    let response = get(
        &router,
        "/api/v1/getWordsByType?type=alphabetical&limit=10&page=1",
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    let words = body["data"]["words"].as_array().unwrap();
    let names: Vec<&str> = words.iter().map(|w| w["word"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["apple", "apple", "mango", "zebra"]);
    // Ties broken by ascending id
    assert!(words[0]["id"].as_str().unwrap() < words[1]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_most_difficult_orders_by_open_count_descending() {
    let (repo, router) = test_app();
    let added = seed_words(&repo, &["easy", "hard", "medium"]).await;
    repo.adjust_counter(added[1].id, CounterField::NoOfTimesOpened, 9)
        .await
        .unwrap();
    repo.adjust_counter(added[2].id, CounterField::NoOfTimesOpened, 4)
        .await
        .unwrap();

    let response = get(
        &router,
        "/api/v1/getWordsByType?type=most_difficult&limit=10&page=1",
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    let names: Vec<&str> = body["data"]["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["word"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["hard", "medium", "easy"]);
}

#[tokio::test]
async fn test_type_defaults_to_normal_and_reports_token() {
    let (repo, router) = test_app();
    seed_words(&repo, &["alpha"]).await;

    let response = get(&router, "/api/v1/getWordsByType?limit=10&page=1").await;

    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["sortType"], "normal");
    assert_eq!(body["data"]["totalCount"], 1);
}

#[tokio::test]
async fn test_sort_type_token_is_case_insensitive() {
    let (repo, router) = test_app();
    seed_words(&repo, &["alpha"]).await;

    let response = get(
        &router,
        "/api/v1/getWordsByType?type=NEWEST_FIRST&limit=10&page=1",
    )
    .await;

    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["data"]["sortType"], "newest_first");
}

#[tokio::test]
async fn test_sorting_types_endpoint_lists_all_tokens() {
    let router = untouchable_app();

    let response = get(&router, "/api/v1/getWordSortingTypes").await;

    let body = expect_json(response, StatusCode::OK).await;
    let types = body["data"].as_array().unwrap();
    assert_eq!(types.len(), SortType::ALL.len());
    for (entry, sort_type) in types.iter().zip(SortType::ALL) {
        assert_eq!(entry["type"], sort_type.token());
        assert!(!entry["description"].as_str().unwrap().is_empty());
    }
}
