//! Ingest orchestration against in-memory stores.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use spacebio_common::{ErrorKind, PublicationIn};
use spacebio_ingestion::{records::RowError, IngestService};
use spacebio_test_utils::{publication, MemoryGraphStore, MemoryPublicationStore, StubInference};

struct Harness {
    inference: Arc<StubInference>,
    store: Arc<MemoryPublicationStore>,
    graph: Arc<MemoryGraphStore>,
    service: IngestService,
}

fn harness() -> Harness {
    let inference = Arc::new(StubInference::new(8));
    let store = Arc::new(MemoryPublicationStore::new(8));
    let graph = Arc::new(MemoryGraphStore::new());
    let service = IngestService::new(inference.clone(), store.clone(), graph.clone());
    Harness { inference, store, graph, service }
}

#[tokio::test]
async fn test_ingest_writes_row_with_input_scalars() {
    let h = harness();
    let input = PublicationIn {
        title: Some("Spaceflight and the mouse liver".to_string()),
        abstract_text: Some("Mice flown on RR-1 ...".to_string()),
        doi: Some("10.1000/xyz".to_string()),
        year: Some(2018),
        mission: Some("RR-1".to_string()),
        repository: Some("GeneLab".to_string()),
        organisms: vec!["Mus musculus".to_string()],
        ..Default::default()
    };

    let outcome = h.service.ingest(input).await.unwrap();
    let row = outcome.publication;

    assert_eq!(h.store.len(), 1);
    assert_eq!(row.title, "Spaceflight and the mouse liver");
    assert_eq!(row.doi.as_deref(), Some("10.1000/xyz"));
    assert_eq!(row.year, Some(2018));
    assert_eq!(row.mission.as_deref(), Some("RR-1"));
    assert_eq!(row.repository.as_deref(), Some("GeneLab"));
    assert!(row.hazards.is_empty());
    assert!(row.keywords.is_empty());

    let stored = &h.store.rows()[0];
    assert_eq!(stored.embedding.as_ref().map(Vec::len), Some(8));
    assert_eq!(h.graph.publication(row.id).map(|p| p.id), Some(row.id));
}

#[tokio::test]
async fn test_embedding_source_order() {
    let h = harness();
    h.service
        .ingest(PublicationIn {
            title: Some("Title A".to_string()),
            abstract_text: Some("Abstract A".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    h.service.ingest(publication("Title B")).await.unwrap();
    h.service
        .ingest(PublicationIn {
            title: Some("Title C".to_string()),
            abstract_text: Some("   ".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(h.inference.embed_inputs(), vec!["Abstract A", "Title B", "Title C"]);
}

#[tokio::test]
async fn test_missing_title_is_validation_error_without_writes() {
    let h = harness();
    let err = h.service.ingest(PublicationIn::default()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Title field is required");
    assert!(h.store.is_empty());
    assert_eq!(h.graph.publication_count(), 0);
    assert!(h.inference.embed_inputs().is_empty());
}

#[tokio::test]
async fn test_same_title_twice_yields_two_rows_and_two_nodes() {
    let h = harness();
    let a = h.service.ingest(publication("Duplicate study")).await.unwrap();
    let b = h.service.ingest(publication("Duplicate study")).await.unwrap();

    assert_ne!(a.publication.id, b.publication.id);
    assert_eq!(h.store.len(), 2);
    assert_eq!(h.graph.publication_count(), 2);
}

#[tokio::test]
async fn test_relationships_are_mirrored() {
    let h = harness();
    let outcome = h
        .service
        .ingest(PublicationIn {
            title: Some("Plant growth under radiation".to_string()),
            organisms: vec!["Arabidopsis thaliana".to_string()],
            hazards: vec!["radiation".to_string()],
            assays: vec!["RNA-seq".to_string()],
            outcomes: vec!["reduced root length".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    let id = outcome.publication.id;

    assert_eq!(
        h.graph.edges(),
        vec![
            (id, "HAS_HAZARD", "radiation".to_string()),
            (id, "STUDIES", "Arabidopsis thaliana".to_string()),
            (id, "USED_ASSAY", "RNA-seq".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_inference_failure_is_upstream_and_nothing_is_stored() {
    let h = harness();
    h.inference.set_failing(true);

    let err = h.service.ingest(publication("Any")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_graph_failure_leaves_relational_row() {
    let h = harness();
    h.graph.set_failing(true);

    let err = h.service.ingest(publication("Half written")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(h.store.len(), 1);
    assert_eq!(h.graph.publication_count(), 0);
}

#[tokio::test]
async fn test_ingest_all_counts_failures_and_continues() {
    let h = harness();
    let report = h
        .service
        .ingest_all(vec![Ok(publication("One")), Ok(PublicationIn::default()), Ok(publication("Three"))])
        .await;

    assert_eq!(report.ingested, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(h.store.len(), 2);
}

#[tokio::test]
async fn test_ingest_all_counts_unparsable_rows_in_place() {
    let h = harness();
    let report = h
        .service
        .ingest_all(vec![
            Ok(publication("One")),
            Err(RowError::InvalidYear("soon".to_string())),
            Ok(publication("Three")),
        ])
        .await;

    assert_eq!(report.ingested, 2);
    assert_eq!(report.failed, 1);
    let titles: Vec<_> = h.store.rows().into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["One".to_string(), "Three".to_string()]);
}
