use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use spacebio_inference::{Inference, InferenceError, Result};

/// Deterministic inference stand-in.
///
/// Embeddings are derived from the input text so equal inputs give equal
/// vectors. Summaries are a fixed string unless overridden.
pub struct StubInference {
    dimensions: usize,
    summary: String,
    failing: AtomicBool,
    embed_inputs: Mutex<Vec<String>>,
    summarize_inputs: Mutex<Vec<(String, u32)>>,
}

impl StubInference {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            summary: "stub summary".to_string(),
            failing: AtomicBool::new(false),
            embed_inputs: Mutex::new(Vec::new()),
            summarize_inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Make every subsequent call fail with HTTP 503.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Texts passed to `embed`, in call order.
    pub fn embed_inputs(&self) -> Vec<String> {
        self.embed_inputs.lock().unwrap().clone()
    }

    pub fn summarize_inputs(&self) -> Vec<(String, u32)> {
        self.summarize_inputs.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InferenceError::Status {
                status: 503,
                body: "stub inference unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for StubInference {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl Inference for StubInference {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_inputs.lock().unwrap().push(text.to_string());
        self.check()?;

        let mut state = text
            .bytes()
            .fold(5381u32, |h, b| h.wrapping_mul(33).wrapping_add(b as u32));
        let mut embedding = Vec::with_capacity(self.dimensions);
        for _ in 0..self.dimensions {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            embedding.push(((state >> 16) as f32 / 32768.0) - 1.0);
        }
        Ok(embedding)
    }

    async fn summarize(&self, text: &str, max_length: u32) -> Result<String> {
        self.summarize_inputs.lock().unwrap().push((text.to_string(), max_length));
        self.check()?;
        Ok(self.summary.clone())
    }
}
