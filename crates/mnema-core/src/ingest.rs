//! Deduplicating word ingestion.
//!
//! One batched existence check, an in-memory partition, one batched insert.
//! The store-level unique index on the case-folded name backs the check;
//! the check itself is what produces the skipped-name diagnostics.

use crate::error::{Error, Result};
use crate::models::{IngestOutcome, NewWord};
use crate::traits::WordRepository;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Partition `batch` against the store and insert only the new names.
///
/// Each candidate's name is case-folded and checked against existing
/// records with a single batched lookup. Candidates whose folded name
/// collides with an earlier entry in the same batch are also skipped
/// (first occurrence wins), which keeps the batched insert compatible
/// with the store's case-folded unique index.
///
/// # Errors
/// - `InvalidInput` for an empty batch or an entry with a blank name
/// - `AllDuplicates` when nothing remains to insert; carries the skipped
///   names for diagnostics
#[instrument(skip(repo, batch), fields(subsystem = "core", component = "ingest", batch_size = batch.len()))]
pub async fn ingest_words<R>(repo: &R, batch: Vec<NewWord>) -> Result<IngestOutcome>
where
    R: WordRepository + ?Sized,
{
    if batch.is_empty() {
        return Err(Error::InvalidInput(
            "words must be a non-empty array".to_string(),
        ));
    }
    if batch.iter().any(|e| e.word.trim().is_empty()) {
        return Err(Error::InvalidInput(
            "every entry must carry a non-empty word".to_string(),
        ));
    }

    let folded: Vec<String> = batch.iter().map(|e| e.word.to_lowercase()).collect();
    let mut seen: HashSet<String> = repo
        .find_existing_names(&folded)
        .await?
        .into_iter()
        .collect();

    let mut unique = Vec::new();
    let mut skipped = Vec::new();
    for entry in batch {
        let key = entry.word.to_lowercase();
        if seen.contains(&key) {
            skipped.push(entry.word);
        } else {
            seen.insert(key);
            unique.push(entry);
        }
    }

    if unique.is_empty() {
        return Err(Error::AllDuplicates { skipped });
    }

    let added = repo.insert_batch(&unique).await?;
    debug!(
        added = added.len(),
        skipped = skipped.len(),
        "ingested word batch"
    );
    Ok(IngestOutcome { added, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::MemWordRepository;

    async fn store_with(names: &[&str]) -> MemWordRepository {
        let repo = MemWordRepository::new();
        let entries: Vec<NewWord> = names.iter().map(|n| NewWord::named(*n)).collect();
        repo.insert_batch(&entries).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_empty_batch_is_invalid_input() {
        let repo = MemWordRepository::new();
        let err = ingest_words(&repo, vec![]).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_blank_name_is_invalid_input() {
        let repo = MemWordRepository::new();
        let batch = vec![NewWord::named("valid"), NewWord::named("   ")];
        let err = ingest_words(&repo, batch).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mixed_case_duplicate_is_skipped_new_name_added() {
        let repo = store_with(&["ephemeral"]).await;
        let batch = vec![NewWord::named("EPHEMERAL"), NewWord::named("sonder")];

        let outcome = ingest_words(&repo, batch).await.unwrap();

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].word, "sonder");
        assert_eq!(outcome.skipped, vec!["EPHEMERAL".to_string()]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_all_duplicates_fails_and_store_unchanged() {
        let repo = store_with(&["ephemeral", "sonder"]).await;
        let batch = vec![NewWord::named("Ephemeral"), NewWord::named("SONDER")];

        let err = ingest_words(&repo, batch).await.unwrap_err();

        match err {
            Error::AllDuplicates { skipped } => {
                assert_eq!(
                    skipped,
                    vec!["Ephemeral".to_string(), "SONDER".to_string()]
                );
            }
            other => panic!("expected AllDuplicates, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_in_batch_duplicate_first_occurrence_wins() {
        let repo = MemWordRepository::new();
        let batch = vec![
            NewWord::named("Apple"),
            NewWord::named("apple"),
            NewWord::named("banana"),
        ];

        let outcome = ingest_words(&repo, batch).await.unwrap();

        assert_eq!(outcome.added.len(), 2);
        assert_eq!(outcome.added[0].word, "Apple");
        assert_eq!(outcome.added[1].word, "banana");
        assert_eq!(outcome.skipped, vec!["apple".to_string()]);
    }

    #[tokio::test]
    async fn test_input_order_is_preserved() {
        let repo = MemWordRepository::new();
        let batch = vec![
            NewWord::named("cherry"),
            NewWord::named("apricot"),
            NewWord::named("banana"),
        ];

        let outcome = ingest_words(&repo, batch).await.unwrap();

        let names: Vec<&str> = outcome.added.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(names, vec!["cherry", "apricot", "banana"]);
    }

    #[tokio::test]
    async fn test_inserted_records_carry_submitted_fields() {
        let repo = MemWordRepository::new();
        let mut entry = NewWord::named("petrichor");
        entry.pronunciation = Some("PET-ri-kor".to_string());
        entry.synonyms = vec!["after-rain smell".to_string()];

        let outcome = ingest_words(&repo, vec![entry]).await.unwrap();

        let added = &outcome.added[0];
        assert_eq!(added.pronunciation.as_deref(), Some("PET-ri-kor"));
        assert_eq!(added.synonyms, vec!["after-rain smell".to_string()]);
        assert_eq!(added.no_of_times_opened, 0);
        assert_eq!(added.no_of_times_revised, 0);
    }
}
