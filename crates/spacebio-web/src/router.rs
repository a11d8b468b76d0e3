//! Axum router: maps all URL paths to handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

use crate::handlers::{
    ingest::ingest,
    search::search,
    summarize::summarize,
    system::{health, root, test_graph, test_relational},
};
use crate::state::{AppState, SharedState};

/// Build the full router. When `frontend_dir` exists it is served for every
/// path the API does not claim, with `index.html` as the fallback page.
pub fn build_router(state: AppState, frontend_dir: Option<&Path>) -> Router {
    let shared: SharedState = Arc::new(state);

    let mut router = Router::new()
        .route("/api/health",        get(health))
        .route("/api/",              get(root))
        .route("/api/test-supabase", get(test_relational))
        .route("/api/test-neo4j",    get(test_graph))
        .route("/api/summarize",     post(summarize))
        .route("/api/ingest",        post(ingest))
        .route("/api/search",        post(search));

    if let Some(dir) = frontend_dir.filter(|d| d.is_dir()) {
        info!(dir = %dir.display(), "Serving frontend");
        let index = ServeFile::new(dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
