//! Usage counter HTTP handlers.
//!
//! Each handler applies a +1 or -1 delta through the store's atomic
//! primitive and returns the post-mutation value. Decrements are unguarded:
//! a counter at 0 goes to -1.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiError, AppState};
use mnema_core::{CounterField, CounterUpdate};

/// Request body for counter mutation.
#[derive(Debug, Deserialize)]
pub struct CounterRequest {
    pub id: Option<String>,
}

/// Validate the id field before touching the store.
fn parse_id(body: &CounterRequest) -> Result<Uuid, ApiError> {
    let raw = body
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?;

    Uuid::parse_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid word id", raw)))
}

fn open_count_body(update: CounterUpdate) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            "wordId": update.id,
            "word": update.word,
            "no_of_times_opened": update.no_of_times_opened,
        },
    })
}

fn revision_count_body(update: CounterUpdate) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "data": {
            "wordId": update.id,
            "word": update.word,
            "no_of_times_revised": update.no_of_times_revised,
            "no_of_times_opened": update.no_of_times_opened,
        },
    })
}

/// Atomically add 1 to a word's open count.
///
/// # Returns
/// - 200 OK with `{success, data: {wordId, word, no_of_times_opened}}`
/// - 400 Bad Request on a missing or malformed id
/// - 404 Not Found when no word matches
pub async fn increase_open_count(
    State(state): State<AppState>,
    Json(body): Json<CounterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&body)?;
    let update = state
        .words
        .adjust_counter(id, CounterField::NoOfTimesOpened, 1)
        .await?;
    Ok(Json(open_count_body(update)))
}

/// Atomically subtract 1 from a word's open count.
pub async fn decrease_open_count(
    State(state): State<AppState>,
    Json(body): Json<CounterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&body)?;
    let update = state
        .words
        .adjust_counter(id, CounterField::NoOfTimesOpened, -1)
        .await?;
    Ok(Json(open_count_body(update)))
}

/// Atomically add 1 to a word's revision count.
///
/// # Returns
/// - 200 OK with `{success, data: {wordId, word, no_of_times_revised, no_of_times_opened}}`
/// - 400 Bad Request on a missing or malformed id
/// - 404 Not Found when no word matches
pub async fn increase_revision_count(
    State(state): State<AppState>,
    Json(body): Json<CounterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&body)?;
    let update = state
        .words
        .adjust_counter(id, CounterField::NoOfTimesRevised, 1)
        .await?;
    Ok(Json(revision_count_body(update)))
}

/// Atomically subtract 1 from a word's revision count.
pub async fn decrease_revision_count(
    State(state): State<AppState>,
    Json(body): Json<CounterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&body)?;
    let update = state
        .words
        .adjust_counter(id, CounterField::NoOfTimesRevised, -1)
        .await?;
    Ok(Json(revision_count_body(update)))
}
