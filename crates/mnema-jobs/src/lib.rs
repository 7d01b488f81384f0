//! # mnema-jobs
//!
//! Offline enrichment batch job for mnema.
//!
//! The runner here is deliberately sequential: one batch of words lacking a
//! mnemonic, one generation call, one apply pass, then a fixed pause before
//! the next batch. The pause is provider rate-limit courtesy, not a retry
//! mechanism. A failed batch is logged and skipped; the run continues.

pub mod enrich;

pub use enrich::{build_enrichment_prompt, EnrichConfig, EnrichmentRunner, RunReport};
