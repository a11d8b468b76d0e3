use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use spacebio_common::SpacebioError;

use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// POST /api/summarize
pub async fn summarize(
    State(state): State<SharedState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(req) = payload?;
    let text = match req.text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Err(ApiError::bad_request("Text field is required")),
    };
    let max_length = req.max_length.unwrap_or(state.summary_max_length);

    let summary = state
        .inference
        .summarize(&text, max_length)
        .await
        .map_err(SpacebioError::from)?;
    Ok(Json(SummarizeResponse { summary }))
}
