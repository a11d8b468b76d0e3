//! Response-shape handling for the inference endpoints.
//!
//! The hosted API is not consistent about wrapping: the same model may answer
//! with a bare object or with a one-element list of objects.

use serde_json::Value;

use crate::error::{InferenceError, Result};

/// Extract the embedding from `{"embedding": [...]}` or `[{"embedding": [...]}, ...]`.
pub fn parse_embedding(value: &Value) -> Result<Vec<f32>> {
    let embedding = match value {
        Value::Object(map) => map.get("embedding"),
        Value::Array(items) => items.first().and_then(|first| first.get("embedding")),
        _ => None,
    }
    .ok_or_else(|| InferenceError::UnexpectedResponse(truncate(value)))?;

    embedding
        .as_array()
        .ok_or_else(|| InferenceError::UnexpectedResponse(truncate(value)))?
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| InferenceError::UnexpectedResponse(format!("non-numeric component {v}")))
        })
        .collect()
}

/// Extract `summary_text` from `[{"summary_text": "..."}]`, otherwise stringify the response.
pub fn parse_summary(value: Value) -> String {
    if let Some(text) = value
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("summary_text"))
        .and_then(Value::as_str)
    {
        return text.to_string();
    }

    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn truncate(value: &Value) -> String {
    let raw = value.to_string();
    if raw.chars().count() > 200 {
        let head: String = raw.chars().take(200).collect();
        format!("{head}…")
    } else {
        raw
    }
}
