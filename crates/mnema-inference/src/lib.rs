//! # mnema-inference
//!
//! Generative-AI enrichment client for mnema.
//!
//! This crate provides:
//! - Pluggable generation backends behind [`mnema_core::GenerationBackend`]
//! - Ollama implementation (default)
//! - OpenAI-compatible implementation (optional, feature `openai`)
//! - The response-to-record parser that turns raw model text into
//!   [`mnema_core::EnrichmentRecord`]s
//!
//! The backends are pure text-to-text boundaries: a prompt goes in, the raw
//! model response comes out, and provider failures surface as
//! [`mnema_core::Error::Inference`] without retries. Nothing here knows the
//! Word schema; that knowledge lives in the parser's output type alone.
//!
//! # Feature Flags
//!
//! - `ollama` (default): Enable Ollama backend
//! - `openai`: Enable OpenAI-compatible backend
//! - `mock`: Enable the mock backend for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use mnema_inference::{parse_enrichment_response, OllamaBackend};
//! use mnema_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OllamaBackend::from_env();
//!     let raw = backend.generate("Give me mnemonics as a JSON array").await.unwrap();
//!     let records = parse_enrichment_response(&raw).unwrap();
//!     println!("parsed {} enrichment records", records.len());
//! }
//! ```

pub mod response;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use mnema_core::*;

pub use response::parse_enrichment_response;

#[cfg(feature = "ollama")]
pub use ollama::OllamaBackend;

#[cfg(feature = "openai")]
pub use openai::{OpenAIBackend, OpenAIConfig};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
