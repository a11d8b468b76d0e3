//! Embedding and summarization over a hosted inference API.
//!
//! The rest of the workspace only sees the [`Inference`] trait; the concrete
//! [`HfInferenceClient`] talks to the Hugging Face Inference API.

pub mod client;
pub mod error;
pub mod response;

use async_trait::async_trait;

pub use client::HfInferenceClient;
pub use error::{InferenceError, Result};

/// Remote model endpoints used by ingest and the HTTP surface.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Compute a fixed-length embedding for `text`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Summarize `text`; `max_length` is passed to the model as a length hint.
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String>;
}
