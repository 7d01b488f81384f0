//! Word ingestion and listing HTTP handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiError, AppState};
use mnema_core::{
    defaults, ingest_words, NewWord, Pagination, SortDirection, SortKey, SortSpec, SortType,
};

/// Query parameters for paginated listings.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

/// Query parameters for the sorted listing.
#[derive(Debug, Deserialize)]
pub struct ListByTypeQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
    #[serde(rename = "type")]
    pub sort_type: Option<String>,
}

/// Query parameters for substring filtering.
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub word: Option<String>,
}

/// Batched deduplicating insert.
///
/// # Request Body
/// `{"words": [{"word": "...", ...}, ...]}` — a non-empty array of entries.
///
/// # Returns
/// - 200 OK with `{message, addedWords, skippedWords}`
/// - 400 Bad Request when `words` is missing, not an array, empty, carries
///   a blank name, or every name already exists (body then lists
///   `skippedWords`)
pub async fn post_words(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = match body.get("words") {
        Some(value) if value.is_array() => value.clone(),
        _ => {
            return Err(ApiError::BadRequest(
                "words must be a non-empty array".to_string(),
            ))
        }
    };

    let batch: Vec<NewWord> = serde_json::from_value(entries)
        .map_err(|e| ApiError::BadRequest(format!("invalid word entry: {}", e)))?;

    let outcome = ingest_words(state.words.as_ref(), batch).await?;

    Ok(Json(serde_json::json!({
        "message": format!("{} words added", outcome.added.len()),
        "addedWords": outcome.added,
        "skippedWords": outcome.skipped,
    })))
}

/// Paginated listing in insertion order (oldest first).
///
/// # Query Parameters
/// - `limit`: page size, 1-100 (default 10)
/// - `page`: page number, >= 1 (default 1)
///
/// # Returns
/// - 200 OK with `{totalCount, totalPages, currentPage, words}`
/// - 400 Bad Request on out-of-range pagination
pub async fn get_words(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = Pagination::new(
        query.limit.unwrap_or(defaults::PAGE_LIMIT),
        query.page.unwrap_or(defaults::PAGE_NUMBER),
    )?;
    let sort = SortSpec::new(SortKey::CreatedAt, SortDirection::Ascending);

    let (words, total) = state.words.list(sort, page).await?;

    Ok(Json(serde_json::json!({
        "totalCount": total,
        "totalPages": page.total_pages(total),
        "currentPage": page.page(),
        "words": words,
    })))
}

/// Case-insensitive substring search on the word text.
///
/// # Query Parameters
/// - `word`: the fragment to search for (required)
///
/// # Returns
/// - 200 OK with `{count, words}` ordered by word text then id
/// - 400 Bad Request when the fragment is missing or empty
pub async fn filter_words(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let fragment = query
        .word
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::BadRequest("word query parameter is required".to_string()))?;

    let words = state.words.filter_substring(fragment).await?;

    Ok(Json(serde_json::json!({
        "count": words.len(),
        "words": words,
    })))
}

/// Fetch one word by id.
///
/// # Returns
/// - 200 OK with `{success, data}`
/// - 400 Bad Request on a malformed id
/// - 404 Not Found when no word matches
pub async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid word id", id)))?;

    let word = state.words.fetch(id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": word,
    })))
}

/// Sorted, paginated listing.
///
/// The sort token is resolved before the store is touched: an unknown token
/// fails without a query.
///
/// # Query Parameters
/// - `type`: sort-type token (default `normal`)
/// - `limit`: page size, 1-100 (default 10)
/// - `page`: page number, >= 1 (default 1)
///
/// # Returns
/// - 200 OK with `{success, data: {totalCount, totalPages, currentPage, sortType, words}}`
/// - 400 Bad Request on an unknown token (listing the valid set) or bad
///   pagination
pub async fn get_words_by_type(
    State(state): State<AppState>,
    Query(query): Query<ListByTypeQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sort_type: SortType = query.sort_type.as_deref().unwrap_or("normal").parse()?;
    let page = Pagination::new(
        query.limit.unwrap_or(defaults::PAGE_LIMIT),
        query.page.unwrap_or(defaults::PAGE_NUMBER),
    )?;

    let (words, total) = state.words.list(sort_type.sort_spec(), page).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "data": {
            "totalCount": total,
            "totalPages": page.total_pages(total),
            "currentPage": page.page(),
            "sortType": sort_type.token(),
            "words": words,
        },
    })))
}

/// Enumerate the supported sort-type tokens with descriptions.
pub async fn get_word_sorting_types() -> Json<serde_json::Value> {
    let types: Vec<serde_json::Value> = SortType::ALL
        .iter()
        .map(|t| {
            serde_json::json!({
                "type": t.token(),
                "description": t.description(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "success": true,
        "data": types,
    }))
}
