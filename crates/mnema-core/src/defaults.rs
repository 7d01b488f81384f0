//! Centralized default constants for the mnema system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size when a listing request omits `limit`.
pub const PAGE_LIMIT: i64 = 10;

/// Smallest accepted page size.
pub const PAGE_LIMIT_MIN: i64 = 1;

/// Largest accepted page size.
pub const PAGE_LIMIT_MAX: i64 = 100;

/// Default page number when a listing request omits `page`.
pub const PAGE_NUMBER: i64 = 1;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes (1 MB; word batches are small).
pub const MAX_BODY_SIZE_BYTES: usize = 1024 * 1024;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Ollama base URL.
pub const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default generation model name (Ollama).
pub const GEN_MODEL: &str = "gpt-oss:20b";

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// ENRICHMENT JOB
// =============================================================================

/// Words requested from the store per enrichment batch.
pub const ENRICH_BATCH_SIZE: i64 = 10;

/// Pause between enrichment batches in seconds. Provider rate-limit
/// courtesy, not a retry mechanism.
pub const ENRICH_DELAY_SECS: u64 = 300;
