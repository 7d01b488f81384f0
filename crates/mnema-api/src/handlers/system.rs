//! Health check handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::AppState;

/// Liveness plus a store ping.
///
/// # Returns
/// - 200 OK with `{status, version, totalWords}` when the store answers
/// - 503 Service Unavailable with `{status, error}` when it does not
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.words.count().await {
        Ok(total) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "totalWords": total,
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "degraded",
                "error": e.to_string(),
            })),
        ),
    }
}
