//! In-memory word store.
//!
//! Implements [`WordRepository`] over a mutex-guarded vector. Always
//! compiled (not test-gated) so downstream crates can drive their own tests
//! and local experiments against repository semantics without PostgreSQL.
//! The mutex plays the role of the store's atomic primitive: every
//! operation, including counter adjustment, runs under one lock.

use crate::error::{Error, Result};
use crate::models::{CounterField, CounterUpdate, EnrichmentRecord, NewWord, Word};
use crate::sort::{Pagination, SortDirection, SortKey, SortSpec};
use crate::traits::WordRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashSet;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Mutex-guarded in-memory implementation of [`WordRepository`].
#[derive(Debug, Default)]
pub struct MemWordRepository {
    words: Mutex<Vec<Word>>,
}

impl MemWordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully specified record as-is. Tests use this to control
    /// ids, counters, and timestamps.
    pub async fn push(&self, word: Word) {
        self.words.lock().await.push(word);
    }

    /// Clone of the current store contents, in insertion order.
    pub async fn snapshot(&self) -> Vec<Word> {
        self.words.lock().await.clone()
    }

    fn materialize(entry: &NewWord) -> Word {
        let now = Utc::now();
        Word {
            id: Uuid::new_v4(),
            word: entry.word.clone(),
            pronunciation: entry.pronunciation.clone(),
            meaning: entry.meaning.clone(),
            synonyms: entry.synonyms.clone(),
            antonyms: entry.antonyms.clone(),
            origin: entry.origin.clone(),
            relate_with: entry.relate_with.clone(),
            mnemonic: entry.mnemonic.clone(),
            breakdown: entry.breakdown.clone(),
            no_of_times_opened: 0,
            no_of_times_revised: 0,
            created_at_utc: now,
            updated_at_utc: now,
        }
    }

    fn compare(a: &Word, b: &Word, spec: SortSpec) -> Ordering {
        let primary = match spec.key {
            SortKey::RevisionCount => a.no_of_times_revised.cmp(&b.no_of_times_revised),
            SortKey::OpenCount => a.no_of_times_opened.cmp(&b.no_of_times_opened),
            SortKey::CreatedAt => a.created_at_utc.cmp(&b.created_at_utc),
            SortKey::WordText => a.word.cmp(&b.word),
        };
        // id tie-break shares the primary direction, so reversing the whole
        // ordering covers the descending case.
        let total = primary.then_with(|| a.id.cmp(&b.id));
        match spec.direction {
            SortDirection::Ascending => total,
            SortDirection::Descending => total.reverse(),
        }
    }
}

#[async_trait]
impl WordRepository for MemWordRepository {
    async fn insert_batch(&self, entries: &[NewWord]) -> Result<Vec<Word>> {
        let mut words = self.words.lock().await;
        let inserted: Vec<Word> = entries.iter().map(Self::materialize).collect();
        words.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn find_existing_names(&self, folded_names: &[String]) -> Result<Vec<String>> {
        let wanted: HashSet<&str> = folded_names.iter().map(String::as_str).collect();
        let words = self.words.lock().await;
        Ok(words
            .iter()
            .map(|w| w.word.to_lowercase())
            .filter(|folded| wanted.contains(folded.as_str()))
            .collect())
    }

    async fn fetch(&self, id: Uuid) -> Result<Word> {
        let words = self.words.lock().await;
        words
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(Error::WordNotFound(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Word>> {
        let folded = name.to_lowercase();
        let words = self.words.lock().await;
        Ok(words
            .iter()
            .find(|w| w.word.to_lowercase() == folded)
            .cloned())
    }

    async fn list(&self, sort: SortSpec, page: Pagination) -> Result<(Vec<Word>, i64)> {
        let words = self.words.lock().await;
        let total = words.len() as i64;

        let mut ordered: Vec<Word> = words.clone();
        ordered.sort_by(|a, b| Self::compare(a, b, sort));

        let start = (page.offset() as usize).min(ordered.len());
        let end = (start + page.limit() as usize).min(ordered.len());
        Ok((ordered[start..end].to_vec(), total))
    }

    async fn filter_substring(&self, fragment: &str) -> Result<Vec<Word>> {
        let needle = fragment.to_lowercase();
        let words = self.words.lock().await;
        let mut matches: Vec<Word> = words
            .iter()
            .filter(|w| w.word.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.word.cmp(&b.word).then_with(|| a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn adjust_counter(
        &self,
        id: Uuid,
        field: CounterField,
        delta: i64,
    ) -> Result<CounterUpdate> {
        let mut words = self.words.lock().await;
        let word = words
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(Error::WordNotFound(id))?;

        match field {
            CounterField::NoOfTimesOpened => word.no_of_times_opened += delta,
            CounterField::NoOfTimesRevised => word.no_of_times_revised += delta,
        }
        word.updated_at_utc = Utc::now();

        Ok(CounterUpdate {
            id: word.id,
            word: word.word.clone(),
            no_of_times_opened: word.no_of_times_opened,
            no_of_times_revised: word.no_of_times_revised,
        })
    }

    async fn apply_enrichment(&self, record: &EnrichmentRecord) -> Result<bool> {
        let folded = record.word.to_lowercase();
        let mut words = self.words.lock().await;
        let Some(word) = words.iter_mut().find(|w| w.word.to_lowercase() == folded) else {
            return Ok(false);
        };

        if let Some(p) = &record.pronunciation {
            word.pronunciation = Some(p.clone());
        }
        if !record.meaning.is_empty() {
            word.meaning = record.meaning.clone();
        }
        if !record.synonyms.is_empty() {
            word.synonyms = record.synonyms.clone();
        }
        if !record.antonyms.is_empty() {
            word.antonyms = record.antonyms.clone();
        }
        if let Some(o) = &record.origin {
            word.origin = Some(o.clone());
        }
        if let Some(r) = &record.relate_with {
            word.relate_with = Some(r.clone());
        }
        if let Some(m) = &record.mnemonic {
            word.mnemonic = Some(m.clone());
        }
        if let Some(b) = &record.breakdown {
            word.breakdown = Some(b.clone());
        }
        word.updated_at_utc = Utc::now();
        Ok(true)
    }

    async fn list_missing_mnemonic(&self, limit: i64) -> Result<Vec<Word>> {
        let words = self.words.lock().await;
        let mut missing: Vec<Word> = words
            .iter()
            .filter(|w| w.mnemonic.is_none())
            .cloned()
            .collect();
        missing.sort_by(|a, b| {
            a.created_at_utc
                .cmp(&b.created_at_utc)
                .then_with(|| a.id.cmp(&b.id))
        });
        missing.truncate(limit.max(0) as usize);
        Ok(missing)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.words.lock().await.len() as i64)
    }
}
