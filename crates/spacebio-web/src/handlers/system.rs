//! Liveness and connectivity probes.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use spacebio_common::SpacebioError;

use crate::error::ApiError;
use crate::state::SharedState;

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "NASA Backend operational" }))
}

/// GET /api/test-supabase: first row of the relational table, if any.
pub async fn test_relational(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let rows = state.store.sample(1).await.map_err(SpacebioError::from)?;
    Ok(Json(json!({ "data": rows })))
}

/// GET /api/test-neo4j
pub async fn test_graph(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let msg = state.graph.ping().await.map_err(SpacebioError::from)?;
    Ok(Json(json!({ "data": msg })))
}
