//! Single-record ingest.
//!
//! Steps, in order:
//!   1. validate the title and assign a fresh id
//!   2. embed abstract / title / "No abstract"
//!   3. insert the relational row
//!   4. mirror the publication and its relationships into the graph
//!
//! There is no rollback: if step 4 fails the row from step 3 stays.

use std::sync::Arc;

use serde::Serialize;
use spacebio_common::{PublicationIn, Result};
use spacebio_db::{PublicationStore, StoredPublication};
use spacebio_inference::Inference;
use spacebio_kg::GraphStore;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::records::RowResult;

#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub publication: StoredPublication,
}

/// Counts from ingesting a batch of records one by one.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub ingested: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct IngestService {
    inference: Arc<dyn Inference>,
    store: Arc<dyn PublicationStore>,
    graph: Arc<dyn GraphStore>,
}

impl IngestService {
    pub fn new(
        inference: Arc<dyn Inference>,
        store: Arc<dyn PublicationStore>,
        graph: Arc<dyn GraphStore>,
    ) -> Self {
        Self { inference, store, graph }
    }

    #[instrument(skip(self, input))]
    pub async fn ingest(&self, input: PublicationIn) -> Result<IngestOutcome> {
        let mut record = input.into_record(Uuid::new_v4())?;
        let id = record.id;

        let embedding = self.inference.embed(record.embedding_source()).await?;
        record.embedding = Some(embedding);

        let publication = self.store.insert(&record).await?;

        if let Err(e) = self.graph.upsert_publication(&record).await {
            error!(publication_id = %id, error = %e, "Graph write failed after relational insert");
            return Err(e.into());
        }

        info!(publication_id = %id, title = %record.title, "Publication ingested");
        Ok(IngestOutcome { publication })
    }

    /// Ingest each parsed row in turn, logging and counting failures.
    /// Rows that failed to parse count as failures under their own index.
    pub async fn ingest_all<I>(&self, rows: I) -> BatchReport
    where
        I: IntoIterator<Item = RowResult>,
    {
        let mut report = BatchReport::default();
        for (row, parsed) in rows.into_iter().enumerate() {
            let input = match parsed {
                Ok(input) => input,
                Err(e) => {
                    warn!(row, error = %e, "Skipping unparsable record");
                    report.failed += 1;
                    continue;
                }
            };
            match self.ingest(input).await {
                Ok(_) => report.ingested += 1,
                Err(e) => {
                    warn!(row, error = %e, "Record not ingested");
                    report.failed += 1;
                }
            }
        }
        report
    }
}
