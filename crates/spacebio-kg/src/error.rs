use spacebio_common::{Service, SpacebioError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KgError>;

#[derive(Debug, Error)]
pub enum KgError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Neo4j returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{code}: {message}")]
    Neo4j { code: String, message: String },

    #[error("Invalid Neo4j URI '{0}'")]
    InvalidUri(String),

    #[error("{0}")]
    UnexpectedResponse(String),

    /// Free-form failure, used by in-memory stores.
    #[error("{0}")]
    Unavailable(String),
}

impl From<KgError> for SpacebioError {
    fn from(e: KgError) -> Self {
        match e {
            KgError::InvalidUri(_) => SpacebioError::Config(e.to_string()),
            KgError::UnexpectedResponse(message) => SpacebioError::UnexpectedResponse {
                service: Service::GraphStore,
                message,
            },
            other => SpacebioError::upstream(Service::GraphStore, other),
        }
    }
}
