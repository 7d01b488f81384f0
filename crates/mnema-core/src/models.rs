//! Core data models for mnema.
//!
//! These types are shared across all mnema crates and represent the word
//! collection's domain entities. The authoritative Word shape is the union
//! of every field the system has ever written; counters default to 0 and
//! the descriptive fields stay absent until enrichment fills them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// WORD TYPES
// =============================================================================

/// One sense of a word: the definition plus an example sentence.
///
/// Order within a word's `meaning` list is display order; the first entry is
/// the primary sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MeaningEntry {
    pub meaning: String,
    /// Example sentence; empty when the source provided none.
    #[serde(default)]
    pub example: String,
}

/// A vocabulary word record.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Word {
    pub id: Uuid,
    /// Natural key; compared case-insensitively for deduplication.
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub meaning: Vec<MeaningEntry>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relate_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
    #[serde(default)]
    pub no_of_times_opened: i64,
    #[serde(default)]
    pub no_of_times_revised: i64,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at_utc: DateTime<Utc>,
}

/// A candidate entry submitted for ingestion. Only `word` is required;
/// everything else may arrive later through enrichment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewWord {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meaning: Vec<MeaningEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relate_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
}

impl NewWord {
    /// Entry carrying just the word text.
    pub fn named(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }
}

/// Result of one deduplicating ingestion call.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct IngestOutcome {
    /// Records inserted by this call, in input order.
    pub added: Vec<Word>,
    /// Candidate names skipped because a record already exists
    /// (case-insensitive), in input order.
    pub skipped: Vec<String>,
}

// =============================================================================
// COUNTERS
// =============================================================================

/// Counter fields that support atomic adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CounterField {
    NoOfTimesOpened,
    NoOfTimesRevised,
}

impl CounterField {
    /// Column name in the words table.
    pub fn column(&self) -> &'static str {
        match self {
            CounterField::NoOfTimesOpened => "no_of_times_opened",
            CounterField::NoOfTimesRevised => "no_of_times_revised",
        }
    }
}

impl std::fmt::Display for CounterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Post-mutation view returned by counter adjustments.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CounterUpdate {
    pub id: Uuid,
    pub word: String,
    pub no_of_times_opened: i64,
    pub no_of_times_revised: i64,
}

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Structured enrichment parsed out of a model response.
///
/// Transient: matched back to an existing word case-insensitively by name
/// and folded into that record, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnrichmentRecord {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meaning: Vec<MeaningEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relate_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<String>,
}
