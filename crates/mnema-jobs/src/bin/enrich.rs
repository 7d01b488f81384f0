//! mnema enrichment runner.
//!
//! Offline batch job that fills in mnemonics (and any missing descriptive
//! fields) for stored words via the configured generation backend.
//!
//! Usage:
//!   cargo run --bin mnema-enrich
//!   ENRICH_BATCH_SIZE=5 ENRICH_DELAY_SECS=60 cargo run --bin mnema-enrich
//!
//! Configuration comes from the environment (and `.env`):
//! `DATABASE_URL`, `OLLAMA_URL`, `GEN_MODEL`, `INFERENCE_TIMEOUT_SECS`,
//! `ENRICH_BATCH_SIZE`, `ENRICH_DELAY_SECS`, `ENRICH_MAX_BATCHES`.

use std::sync::Arc;

use tracing::{info, warn};

use mnema_db::Database;
use mnema_inference::OllamaBackend;
use mnema_jobs::{EnrichConfig, EnrichmentRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mnema_jobs=debug,mnema_inference=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/mnema".to_string());

    info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;
    info!("Database connected");

    let backend = OllamaBackend::from_env();
    if !backend.health_check().await? {
        warn!("Generation backend is not reachable; the run will likely fail every batch");
    }

    let config = EnrichConfig::from_env();
    let runner = EnrichmentRunner::new(Arc::new(db.words), Arc::new(backend), config);

    let report = runner.run().await?;

    println!("Enrichment run finished:");
    println!("  batches:           {}", report.batches);
    println!("  failed batches:    {}", report.failed_batches);
    println!("  records parsed:    {}", report.records_parsed);
    println!("  records applied:   {}", report.records_applied);
    println!("  records unmatched: {}", report.records_unmatched);

    Ok(())
}
