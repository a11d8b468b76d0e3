//! Vector similarity search over ingested publications.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use spacebio_common::SpacebioError;
use spacebio_db::SimilarPublication;

use crate::error::ApiError;
use crate::state::SharedState;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SimilarPublication>,
}

/// POST /api/search
pub async fn search(
    State(state): State<SharedState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = payload?;
    let text = match req.text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ApiError::bad_request("Text field is required")),
    };
    let limit = req.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let embedding = state.inference.embed(&text).await.map_err(SpacebioError::from)?;
    let results = state
        .store
        .nearest(&embedding, limit)
        .await
        .map_err(SpacebioError::from)?;
    Ok(Json(SearchResponse { results }))
}
