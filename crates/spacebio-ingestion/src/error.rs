use spacebio_common::SpacebioError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON input must be an array of objects")]
    NotAnArray,

    #[error("Loader has no {0} configured")]
    MissingComponent(&'static str),

    #[error("Fetching {url} failed after {attempts} attempts: {message}")]
    Fetch { url: String, attempts: u32, message: String },

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<LoadError> for SpacebioError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Csv(_) | LoadError::Json(_) | LoadError::NotAnArray => {
                SpacebioError::validation(e.to_string())
            }
            LoadError::MissingComponent(_) | LoadError::Client(_) => SpacebioError::Config(e.to_string()),
            other => SpacebioError::Other(anyhow::anyhow!(other)),
        }
    }
}
