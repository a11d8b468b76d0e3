//! Bulk loader.
//!
//! One pass over a CSV or JSON file. Each accepted row gets a fresh id and is
//! written to whichever stores `StoreTargets` selects; per-row failures are
//! logged, counted, and the pass continues.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use spacebio_db::PublicationStore;
use spacebio_inference::Inference;
use spacebio_kg::GraphStore;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{LoadError, Result};
use crate::fetch::{truncate_chars, PageFetcher};
use crate::records::{self, RowResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreTargets {
    pub relational: bool,
    pub graph: bool,
}

impl Default for StoreTargets {
    fn default() -> Self {
        Self { relational: true, graph: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    pub targets: StoreTargets,
    /// Compute an embedding for each row.
    pub enrich: bool,
    /// Fetch each row's link and keep the start of the page as `summary`.
    pub fetch_content: bool,
    pub require_link: bool,
    pub summary_chars: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            targets: StoreTargets::default(),
            enrich: false,
            fetch_content: false,
            require_link: false,
            summary_chars: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub skipped: usize,
    pub relational_written: usize,
    pub relational_failed: usize,
    pub graph_written: usize,
    pub graph_failed: usize,
    pub embed_failures: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl LoadReport {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            rows_read: 0,
            skipped: 0,
            relational_written: 0,
            relational_failed: 0,
            graph_written: 0,
            graph_failed: 0,
            embed_failures: 0,
            started_at: now,
            finished_at: now,
        }
    }
}

pub struct Loader {
    options: LoaderOptions,
    store: Option<Arc<dyn PublicationStore>>,
    graph: Option<Arc<dyn GraphStore>>,
    inference: Option<Arc<dyn Inference>>,
    fetcher: Option<PageFetcher>,
}

impl Loader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options, store: None, graph: None, inference: None, fetcher: None }
    }

    pub fn with_store(mut self, store: Arc<dyn PublicationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_graph(mut self, graph: Arc<dyn GraphStore>) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_inference(mut self, inference: Arc<dyn Inference>) -> Self {
        self.inference = Some(inference);
        self
    }

    pub fn with_fetcher(mut self, fetcher: PageFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Every enabled option must have its component attached.
    fn check_components(&self) -> Result<()> {
        let o = &self.options;
        if o.targets.relational && self.store.is_none() {
            return Err(LoadError::MissingComponent("relational store"));
        }
        if o.targets.graph && self.graph.is_none() {
            return Err(LoadError::MissingComponent("graph store"));
        }
        if o.enrich && self.inference.is_none() {
            return Err(LoadError::MissingComponent("inference client"));
        }
        if o.fetch_content && self.fetcher.is_none() {
            return Err(LoadError::MissingComponent("page fetcher"));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn load_path(&self, path: &Path) -> Result<LoadReport> {
        self.check_components()?;
        let rows = records::read_path(path).await?;
        info!(rows = rows.len(), "Input parsed");
        self.load_rows(rows).await
    }

    pub async fn load_rows(&self, rows: Vec<RowResult>) -> Result<LoadReport> {
        self.check_components()?;
        let mut report = LoadReport::start();

        for (row, parsed) in rows.into_iter().enumerate() {
            report.rows_read += 1;

            let input = match parsed {
                Ok(input) => input,
                Err(e) => {
                    warn!(row, error = %e, "Skipping row");
                    report.skipped += 1;
                    continue;
                }
            };

            if self.options.require_link && input.link.is_none() {
                debug!(row, "Skipping row without link");
                report.skipped += 1;
                continue;
            }

            let mut record = match input.into_record(Uuid::new_v4()) {
                Ok(r) => r,
                Err(e) => {
                    debug!(row, error = %e, "Skipping row");
                    report.skipped += 1;
                    continue;
                }
            };

            if let (true, Some(fetcher), Some(link)) =
                (self.options.fetch_content, &self.fetcher, &record.link)
            {
                let content = fetcher.fetch_or_empty(link).await;
                record.summary = Some(truncate_chars(&content, self.options.summary_chars));
            }

            if let (true, Some(inference)) = (self.options.enrich, &self.inference) {
                match inference.embed(record.embedding_source()).await {
                    Ok(embedding) => record.embedding = Some(embedding),
                    Err(e) => {
                        warn!(row, publication_id = %record.id, error = %e, "Embedding failed, storing row without it");
                        report.embed_failures += 1;
                    }
                }
            }

            if let (true, Some(store)) = (self.options.targets.relational, &self.store) {
                match store.insert(&record).await {
                    Ok(_) => report.relational_written += 1,
                    Err(e) => {
                        warn!(row, publication_id = %record.id, error = %e, "Relational write failed");
                        report.relational_failed += 1;
                    }
                }
            }

            if let (true, Some(graph)) = (self.options.targets.graph, &self.graph) {
                match graph.upsert_publication(&record).await {
                    Ok(()) => report.graph_written += 1,
                    Err(e) => {
                        warn!(row, publication_id = %record.id, error = %e, "Graph write failed");
                        report.graph_failed += 1;
                    }
                }
            }

            info!(row, publication_id = %record.id, title = %record.title, "Row loaded");
        }

        report.finished_at = Utc::now();
        info!(
            rows_read = report.rows_read,
            skipped = report.skipped,
            relational_written = report.relational_written,
            graph_written = report.graph_written,
            "Load finished"
        );
        Ok(report)
    }
}
