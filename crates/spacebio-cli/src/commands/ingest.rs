use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use spacebio_ingestion::{records, IngestService};
use tracing::info;

use super::{graph_store, inference_client, print_json, relational_store};

#[derive(Args)]
pub struct IngestArgs {
    /// CSV or JSON file of publications
    pub file: PathBuf,
}

pub async fn run(args: IngestArgs) -> Result<()> {
    let rows = records::read_path(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let service = IngestService::new(inference_client()?, relational_store().await?, graph_store()?);

    let report = service.ingest_all(rows).await;
    info!(ingested = report.ingested, failed = report.failed, "Ingest finished");
    print_json(&report)?;

    if report.ingested == 0 && report.failed > 0 {
        bail!("No records were ingested");
    }
    Ok(())
}
