//! Core trait definitions for the mnema system.
//!
//! Store access and text generation are both dependency-injected through
//! these traits: handlers and the enrichment job receive a handle, never a
//! process-global connection.

use crate::error::Result;
use crate::models::{CounterField, CounterUpdate, EnrichmentRecord, NewWord, Word};
use crate::sort::{Pagination, SortSpec};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence boundary for the word collection.
///
/// Counter adjustments must be delegated to the store's native atomic
/// primitive; read-then-write at this layer loses updates under concurrent
/// calls.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Insert a batch in one write. All-or-nothing at batch granularity:
    /// a failed insert leaves the store unchanged and surfaces one error.
    async fn insert_batch(&self, entries: &[NewWord]) -> Result<Vec<Word>>;

    /// Case-folded names of existing records matching any of `folded_names`.
    ///
    /// One batched lookup regardless of candidate count. Callers pass
    /// already-lowercased names; the returned names are lowercased too.
    async fn find_existing_names(&self, folded_names: &[String]) -> Result<Vec<String>>;

    /// Fetch one record by id.
    ///
    /// # Errors
    /// `WordNotFound` when no record matches.
    async fn fetch(&self, id: Uuid) -> Result<Word>;

    /// Find one record by exact name, compared case-insensitively.
    async fn find_by_name(&self, name: &str) -> Result<Option<Word>>;

    /// One page of records in the given order, plus the total record count.
    async fn list(&self, sort: SortSpec, page: Pagination) -> Result<(Vec<Word>, i64)>;

    /// Every record whose name contains `fragment`, case-insensitive,
    /// ordered by word text then id.
    async fn filter_substring(&self, fragment: &str) -> Result<Vec<Word>>;

    /// Atomically add `delta` to one counter and return the post-mutation
    /// view. Negative results are permitted; no clamping.
    ///
    /// # Errors
    /// `WordNotFound` when no record matches.
    async fn adjust_counter(
        &self,
        id: Uuid,
        field: CounterField,
        delta: i64,
    ) -> Result<CounterUpdate>;

    /// Fold an enrichment record into the word matching `record.word`
    /// case-insensitively. Only fields present in the record are written.
    /// Returns false when no word matches (the record is dropped).
    async fn apply_enrichment(&self, record: &EnrichmentRecord) -> Result<bool>;

    /// Up to `limit` words that still lack a mnemonic, oldest first.
    async fn list_missing_mnemonic(&self, limit: i64) -> Result<Vec<Word>>;

    /// Total number of records.
    async fn count(&self) -> Result<i64>;
}

/// Text-generation boundary: prompt in, raw model text out.
///
/// Implementations surface provider failures (transport, auth, rate limit)
/// as [`crate::Error::Inference`] and never retry — retry policy, if any,
/// belongs to the caller. The boundary has no knowledge of the Word schema.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with a system prompt, where the provider supports one.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// The model name used by this backend.
    fn model_name(&self) -> &str;
}
