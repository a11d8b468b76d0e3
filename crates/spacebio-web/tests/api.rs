//! Router tests with in-memory services.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use spacebio_test_utils::{MemoryGraphStore, MemoryPublicationStore, StubInference};
use spacebio_web::{router::build_router, state::AppState};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    inference: Arc<StubInference>,
    store: Arc<MemoryPublicationStore>,
    graph: Arc<MemoryGraphStore>,
}

fn app() -> TestApp {
    let inference = Arc::new(StubInference::new(8).with_summary("Mice lose bone mass in orbit."));
    let store = Arc::new(MemoryPublicationStore::new(8));
    let graph = Arc::new(MemoryGraphStore::new());
    let state = AppState::new(inference.clone(), store.clone(), graph.clone(), 120);
    TestApp { router: build_router(state, None), inference, store, graph }
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_and_root() {
    let t = app();
    let (status, body) = send(t.router.clone(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(t.router, get("/api/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "NASA Backend operational"}));
}

#[tokio::test]
async fn test_summarize_requires_text() {
    let t = app();
    let (status, body) = send(t.router, post_json("/api/summarize", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Text field is required"}));
    assert!(t.inference.summarize_inputs().is_empty());
}

#[tokio::test]
async fn test_summarize_uses_default_max_length() {
    let t = app();
    let (status, body) = send(
        t.router,
        post_json("/api/summarize", json!({"text": "A long abstract about bone loss."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"summary": "Mice lose bone mass in orbit."}));
    assert_eq!(
        t.inference.summarize_inputs(),
        vec![("A long abstract about bone loss.".to_string(), 120)]
    );
}

#[tokio::test]
async fn test_summarize_upstream_failure_is_500_with_detail() {
    let t = app();
    t.inference.set_failing(true);
    let (status, body) = send(t.router, post_json("/api/summarize", json!({"text": "x"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("inference API"));
}

#[tokio::test]
async fn test_ingest_returns_stored_row() {
    let t = app();
    let (status, body) = send(
        t.router,
        post_json(
            "/api/ingest",
            json!({
                "title": "Rodent Research-1 liver transcriptome",
                "abstract": "Mice flown for 37 days",
                "year": 2014,
                "organisms": ["Mus musculus"],
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let row = &body["supabase_result"][0];
    assert_eq!(row["title"], "Rodent Research-1 liver transcriptome");
    assert_eq!(row["abstract"], "Mice flown for 37 days");
    assert_eq!(row["year"], 2014);
    assert_eq!(row["hazards"], json!([]));
    assert_eq!(t.store.len(), 1);
    assert_eq!(t.graph.publication_count(), 1);
}

#[tokio::test]
async fn test_ingest_without_title_is_400() {
    let t = app();
    let (status, body) = send(t.router, post_json("/api/ingest", json!({"abstract": "no title"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Title field is required");
    assert!(t.store.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let t = app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/ingest")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(t.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_probes() {
    let t = app();
    let (status, body) = send(t.router.clone(), get("/api/test-supabase")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": []}));

    let (status, body) = send(t.router.clone(), get("/api/test-neo4j")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": "Hello from Neo4j!"}));

    t.graph.set_failing(true);
    let (status, body) = send(t.router, get("/api/test-neo4j")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("graph store"));
}

#[tokio::test]
async fn test_search_ranks_exact_match_first() {
    let t = app();
    for title in ["Plant gravitropism", "Bone loss in microgravity", "Crew sleep"] {
        let (status, _) = send(t.router.clone(), post_json("/api/ingest", json!({"title": title}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        t.router,
        post_json("/api/search", json!({"text": "Bone loss in microgravity", "limit": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["title"], "Bone loss in microgravity");
    assert!(results[0]["similarity"].as_f64().unwrap() > 0.99);
}

#[tokio::test]
async fn test_frontend_fallback_serves_index() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>app</html>").unwrap();

    let state = AppState::new(
        Arc::new(StubInference::new(8)),
        Arc::new(MemoryPublicationStore::new(8)),
        Arc::new(MemoryGraphStore::new()),
        120,
    );
    let router = build_router(state, Some(dir.path()));

    let response = router.oneshot(get("/some/client/route")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"<html>app</html>");
}
