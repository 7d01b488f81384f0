//! Shared-secret verification handler.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{ApiError, AppState};

/// Request body for password verification.
#[derive(Debug, Deserialize)]
pub struct VerifyPasswordRequest {
    pub password: Option<String>,
}

/// Compare the submitted password against the configured shared secret.
///
/// # Returns
/// - 200 OK with `{message, token}` on a match
/// - 400 Bad Request when the password field is missing
/// - 401 Unauthorized on a mismatch or when no password is configured
pub async fn verify_password(
    State(state): State<AppState>,
    Json(body): Json<VerifyPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let submitted = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("password is required".to_string()))?;

    match &state.auth.password {
        Some(expected) if *expected == submitted => Ok(Json(serde_json::json!({
            "message": "Password verified",
            "token": state.auth.token.clone().unwrap_or_default(),
        }))),
        Some(_) => Err(ApiError::Unauthorized("wrong password".to_string())),
        None => Err(ApiError::Unauthorized(
            "password verification is not configured".to_string(),
        )),
    }
}
