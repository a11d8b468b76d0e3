use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use spacebio_common::PublicationIn;
use spacebio_db::StoredPublication;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub supabase_result: Vec<StoredPublication>,
}

/// POST /api/ingest
pub async fn ingest(
    State(state): State<SharedState>,
    payload: Result<Json<PublicationIn>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let Json(input) = payload?;
    let outcome = state.ingest.ingest(input).await?;
    Ok(Json(IngestResponse {
        status: "success",
        supabase_result: vec![outcome.publication],
    }))
}
