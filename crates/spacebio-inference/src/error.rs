//! Error types for the inference client.

use spacebio_common::{Service, SpacebioError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, InferenceError>;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer from the API, passed through with its body.
    #[error("inference API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected embedding response: {0}")]
    UnexpectedResponse(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl From<InferenceError> for SpacebioError {
    fn from(e: InferenceError) -> Self {
        match e {
            InferenceError::UnexpectedResponse(message) => SpacebioError::UnexpectedResponse {
                service: Service::Inference,
                message,
            },
            InferenceError::Client(message) => SpacebioError::Config(message),
            other => SpacebioError::upstream(Service::Inference, other),
        }
    }
}
