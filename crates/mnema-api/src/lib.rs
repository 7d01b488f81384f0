//! # mnema-api
//!
//! HTTP API server for mnema: the REST surface over the word collection.
//!
//! The router is built against an injected [`WordRepository`] handle, never
//! a process-global connection, so the whole surface can be exercised in
//! tests over the in-memory store.

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use governor::{Quota, RateLimiter};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use mnema_core::WordRepository;

pub mod handlers;

use handlers::{
    auth::verify_password,
    counters::{
        decrease_open_count, decrease_revision_count, increase_open_count,
        increase_revision_count,
    },
    system::health_check,
    words::{filter_words, get_word, get_word_sorting_types, get_words, get_words_by_type, post_words},
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Shared-secret check configuration.
///
/// Deliberately simple: one password compared on `/verifyPassword`, one
/// static token handed back on success. No middleware enforces the token on
/// other routes.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Expected password; an unset password rejects every attempt.
    pub password: Option<String>,
    /// Token returned to a verified client.
    pub token: Option<String>,
}

impl AuthConfig {
    /// Read `APP_PASSWORD` and `APP_API_TOKEN` from the environment.
    pub fn from_env() -> Self {
        Self {
            password: std::env::var("APP_PASSWORD").ok().filter(|p| !p.is_empty()),
            token: std::env::var("APP_API_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Global rate limiter type (direct quota, no keyed bucketing).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Word store handle. Injected so tests can swap in the in-memory store.
    pub words: Arc<dyn WordRepository>,
    /// Shared-secret check configuration.
    pub auth: AuthConfig,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    /// State with rate limiting disabled; tests and local tools use this.
    pub fn new(words: Arc<dyn WordRepository>, auth: AuthConfig) -> Self {
        Self {
            words,
            auth,
            rate_limiter: None,
        }
    }

    /// Attach a global rate limiter allowing `requests` per `period_secs`.
    pub fn with_rate_limit(mut self, requests: u32, period_secs: u64) -> Self {
        let quota = Quota::with_period(std::time::Duration::from_secs(period_secs))
            .and_then(|q| NonZeroU32::new(requests).map(|r| q.allow_burst(r)));
        if let Some(quota) = quota {
            self.rate_limiter = Some(Arc::new(RateLimiter::direct(quota)));
        }
        self
    }
}

// =============================================================================
// OPENAPI DOCUMENTATION
// =============================================================================

/// OpenAPI metadata served to Swagger UI at `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mnema API",
        description = "Vocabulary-management backend: batched dedup ingestion, sorted listings, usage counters, AI enrichment"
    ),
    components(schemas(
        mnema_core::Word,
        mnema_core::NewWord,
        mnema_core::MeaningEntry,
        mnema_core::CounterUpdate,
        mnema_core::SortType,
    )),
    tags(
        (name = "Words", description = "Word ingestion and listings"),
        (name = "Counters", description = "Usage counter mutation"),
        (name = "System", description = "Health checks and auth")
    )
)]
pub struct ApiDoc;

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    Database(mnema_core::Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    /// Every submitted word already exists; the body carries the names.
    AllDuplicates { skipped: Vec<String> },
}

impl From<mnema_core::Error> for ApiError {
    fn from(err: mnema_core::Error) -> Self {
        use mnema_core::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::WordNotFound(id) => ApiError::NotFound(format!("Word not found: {}", id)),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::InvalidPagination(msg) => ApiError::BadRequest(msg),
            Error::UnsupportedSortType { .. } => ApiError::BadRequest(err.to_string()),
            Error::AllDuplicates { skipped } => ApiError::AllDuplicates { skipped },
            other => ApiError::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Database(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": err.to_string()}),
            ),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, serde_json::json!({"error": msg}))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({"error": msg})),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({"error": msg}))
            }
            ApiError::AllDuplicates { skipped } => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": format!("All {} submitted words already exist", skipped.len()),
                    "skippedWords": skipped,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// MIDDLEWARE
// =============================================================================

async fn rate_limit_middleware(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

/// Parse allowed CORS origins from the `CORS_ORIGIN` environment variable
/// (comma-separated). An unset or empty variable allows any origin, which
/// suits a token-less personal deployment.
pub fn cors_layer() -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = std::env::var("CORS_ORIGIN")
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    let layer = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    layer
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(std::time::Duration::from_secs(
            mnema_core::defaults::CORS_MAX_AGE_SECS,
        ))
}

/// Request body cap in bytes, overridable with `MAX_BODY_SIZE_MB`. Word
/// batches are small, so the default of 1 MB is generous.
fn max_body_size_bytes() -> usize {
    std::env::var("MAX_BODY_SIZE_MB")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .map(|mb| mb * 1024 * 1024)
        .unwrap_or(mnema_core::defaults::MAX_BODY_SIZE_BYTES)
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth
        .route("/api/v1/verifyPassword", post(verify_password))
        // Words
        .route("/api/v1/postWords", post(post_words))
        .route("/api/v1/getWords", get(get_words))
        .route("/api/v1/words/filter", get(filter_words))
        .route("/api/v1/words/:id", get(get_word))
        .route("/api/v1/getWordsByType", get(get_words_by_type))
        .route("/api/v1/getWordSortingTypes", get(get_word_sorting_types))
        // Counters
        .route("/api/v1/increase_open_count", post(increase_open_count))
        .route("/api/v1/decrease_open_count", post(decrease_open_count))
        .route(
            "/api/v1/increase_revision_count",
            post(increase_revision_count),
        )
        .route(
            "/api/v1/decrease_revision_count",
            post(decrease_revision_count),
        )
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer())
        .layer(RequestBodyLimitLayer::new(max_body_size_bytes()))
        .with_state(state)
}
