//! Sequential enrichment runner.
//!
//! Scans the store for words that still lack a mnemonic, asks the
//! generation backend for enrichment records, parses the response, and
//! folds each record back into its word by case-insensitive name match.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use mnema_core::{defaults, Error, GenerationBackend, Result, Word, WordRepository};
use mnema_inference::parse_enrichment_response;

/// System prompt sent with every enrichment request.
const SYSTEM_PROMPT: &str = "You are a vocabulary tutor. Respond with only a JSON array and no \
     other text. Each element must be an object with a \"word\" key matching one of the given \
     words exactly, and may carry \"pronunciation\", \"meaning\" (array of {\"meaning\", \
     \"example\"} objects), \"synonyms\", \"antonyms\", \"origin\", \"relate_with\", \
     \"mnemonic\", and \"breakdown\" keys.";

/// Configuration for the enrichment runner.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Words requested from the store per batch.
    pub batch_size: i64,
    /// Pause between batches in seconds. Rate-limit courtesy.
    pub delay_secs: u64,
    /// Stop after this many batches; 0 means run until the store has no
    /// un-enriched words left.
    pub max_batches: u64,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::ENRICH_BATCH_SIZE,
            delay_secs: defaults::ENRICH_DELAY_SECS,
            max_batches: 0,
        }
    }
}

impl EnrichConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `ENRICH_BATCH_SIZE` | `10` | Words per batch |
    /// | `ENRICH_DELAY_SECS` | `300` | Pause between batches |
    /// | `ENRICH_MAX_BATCHES` | `0` (unlimited) | Batch cap for one run |
    pub fn from_env() -> Self {
        let batch_size = std::env::var("ENRICH_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults::ENRICH_BATCH_SIZE);

        let delay_secs = std::env::var("ENRICH_DELAY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::ENRICH_DELAY_SECS);

        let max_batches = std::env::var("ENRICH_MAX_BATCHES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Self {
            batch_size,
            delay_secs,
            max_batches,
        }
    }

    /// Set the batch size.
    pub fn with_batch_size(mut self, size: i64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Set the inter-batch delay.
    pub fn with_delay_secs(mut self, secs: u64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Cap the number of batches for one run.
    pub fn with_max_batches(mut self, max: u64) -> Self {
        self.max_batches = max;
        self
    }
}

/// Summary of one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Batches attempted, including failed ones.
    pub batches: u64,
    /// Batches whose generation or parse step failed.
    pub failed_batches: u64,
    /// Enrichment records parsed out of model responses.
    pub records_parsed: u64,
    /// Records folded into a matching word.
    pub records_applied: u64,
    /// Records whose name matched no word (dropped).
    pub records_unmatched: u64,
}

/// Sequential enrichment job over an injected store and backend.
pub struct EnrichmentRunner {
    repo: Arc<dyn WordRepository>,
    backend: Arc<dyn GenerationBackend>,
    config: EnrichConfig,
}

impl EnrichmentRunner {
    pub fn new(
        repo: Arc<dyn WordRepository>,
        backend: Arc<dyn GenerationBackend>,
        config: EnrichConfig,
    ) -> Self {
        Self {
            repo,
            backend,
            config,
        }
    }

    /// Process every word currently lacking a mnemonic, one batch at a
    /// time, until the snapshot is exhausted or the batch cap is hit.
    ///
    /// The pending set is snapshotted once at the start; words added while
    /// the run is in flight wait for the next run. Failure isolation is per
    /// batch: a generation or parse failure is logged, counted, and the
    /// loop moves on. Store failures still abort the run; a broken store
    /// would fail every remaining batch the same way.
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();

        let pending = self.repo.list_missing_mnemonic(i64::MAX).await?;
        if pending.is_empty() {
            info!("no words without a mnemonic, nothing to do");
            return Ok(report);
        }

        info!(
            subsystem = "jobs",
            component = "enrichment",
            pending = pending.len(),
            batch_size = self.config.batch_size,
            delay_secs = self.config.delay_secs,
            model = self.backend.model_name(),
            "starting enrichment run"
        );

        for words in pending.chunks(self.config.batch_size.max(1) as usize) {
            if self.config.max_batches > 0 && report.batches >= self.config.max_batches {
                info!(batches = report.batches, "batch cap reached, stopping");
                break;
            }

            if report.batches > 0 && self.config.delay_secs > 0 {
                debug!(delay_secs = self.config.delay_secs, "pausing between batches");
                sleep(Duration::from_secs(self.config.delay_secs)).await;
            }

            let batch_index = report.batches;
            report.batches += 1;
            if let Err(e) = self.run_batch(batch_index, words, &mut report).await {
                report.failed_batches += 1;
                warn!(
                    batch_index,
                    error = %e,
                    "batch failed, continuing with next batch"
                );
            }
        }

        info!(
            batches = report.batches,
            failed_batches = report.failed_batches,
            records_applied = report.records_applied,
            records_unmatched = report.records_unmatched,
            "enrichment run complete"
        );
        Ok(report)
    }

    async fn run_batch(
        &self,
        batch_index: u64,
        words: &[Word],
        report: &mut RunReport,
    ) -> Result<()> {
        let prompt = build_enrichment_prompt(words);
        debug!(
            batch_index,
            batch_size = words.len(),
            prompt_len = prompt.len(),
            "requesting enrichment"
        );

        let raw = self
            .backend
            .generate_with_system(SYSTEM_PROMPT, &prompt)
            .await?;

        let records = match parse_enrichment_response(&raw) {
            Ok(records) => records,
            Err(Error::MalformedResponse(msg)) => {
                // Recovered locally: zero records for this batch, run goes on.
                warn!(
                    batch_index,
                    response_len = raw.len(),
                    error = %msg,
                    "model response unusable, skipping batch"
                );
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        report.records_parsed += records.len() as u64;
        for record in &records {
            if self.repo.apply_enrichment(record).await? {
                report.records_applied += 1;
            } else {
                report.records_unmatched += 1;
                debug!(word = %record.word, "enrichment record matched no word");
            }
        }

        info!(
            batch_index,
            result_count = records.len(),
            "batch applied"
        );
        Ok(())
    }
}

/// Build the user prompt for one batch of words.
///
/// Lists each word (with its pronunciation when already known, so the model
/// keeps it consistent) and asks for the enrichment array.
pub fn build_enrichment_prompt(words: &[Word]) -> String {
    let mut prompt = String::from(
        "Create a memorable mnemonic, a breakdown of the word's parts, and any missing \
         descriptive fields for each of these vocabulary words:\n",
    );
    for word in words {
        prompt.push_str("- ");
        prompt.push_str(&word.word);
        if let Some(ref pronunciation) = word.pronunciation {
            prompt.push_str(" (pronounced ");
            prompt.push_str(pronunciation);
            prompt.push(')');
        }
        prompt.push('\n');
    }
    prompt.push_str("Return a JSON array with one object per word.");
    prompt
}
