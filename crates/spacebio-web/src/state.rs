//! Shared application state, built once at start-up.

use std::sync::Arc;

use spacebio_db::PublicationStore;
use spacebio_inference::Inference;
use spacebio_ingestion::IngestService;
use spacebio_kg::GraphStore;

#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<dyn Inference>,
    pub store: Arc<dyn PublicationStore>,
    pub graph: Arc<dyn GraphStore>,
    pub ingest: IngestService,
    /// `max_length` sent to the summarizer when the request omits it.
    pub summary_max_length: u32,
}

impl AppState {
    pub fn new(
        inference: Arc<dyn Inference>,
        store: Arc<dyn PublicationStore>,
        graph: Arc<dyn GraphStore>,
        summary_max_length: u32,
    ) -> Self {
        let ingest = IngestService::new(inference.clone(), store.clone(), graph.clone());
        Self { inference, store, graph, ingest, summary_max_length }
    }
}

pub type SharedState = Arc<AppState>;
