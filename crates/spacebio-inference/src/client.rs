//! Hugging Face Inference API client.
//!
//! Endpoints used:
//!   embeddings: {base}/embeddings/{embed_model}
//!   summary:    {base}/models/{summary_model}
//!
//! Failures are returned as-is; nothing here retries.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use spacebio_config::InferenceSettings;
use tracing::{debug, instrument};

use crate::error::{InferenceError, Result};
use crate::response::{parse_embedding, parse_summary};
use crate::Inference;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HfInferenceClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    embed_model: String,
    summary_model: String,
}

impl HfInferenceClient {
    pub fn new(settings: &InferenceSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key: SecretString::from(settings.api_key.expose_secret().to_owned()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            embed_model: settings.embed_model.clone(),
            summary_model: settings.summary_model.clone(),
        })
    }

    pub fn embed_model(&self) -> &str {
        &self.embed_model
    }

    pub fn summary_model(&self) -> &str {
        &self.summary_model
    }

    fn embed_url(&self) -> String {
        format!("{}/embeddings/{}", self.base_url, self.embed_model)
    }

    fn summary_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.summary_model)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let resp = self.client
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Status { status: status.as_u16(), body });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl Inference for HfInferenceClient {
    #[instrument(skip(self, text), fields(model = %self.embed_model, chars = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let resp = self.post_json(&self.embed_url(), &json!({ "inputs": text })).await?;
        let embedding = parse_embedding(&resp)?;
        debug!(dim = embedding.len(), "Embedding received");
        Ok(embedding)
    }

    #[instrument(skip(self, text), fields(model = %self.summary_model, chars = text.len()))]
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String> {
        let body = json!({
            "inputs": text,
            "parameters": { "max_length": max_length },
        });
        let resp = self.post_json(&self.summary_url(), &body).await?;
        Ok(parse_summary(resp))
    }
}
