//! Database error types.

use spacebio_common::{Service, SpacebioError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Postgres error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidEmbeddingDimension { expected: usize, actual: usize },

    /// Free-form failure, used by in-memory stores.
    #[error("{0}")]
    Unavailable(String),
}

impl From<DbError> for SpacebioError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::InvalidEmbeddingDimension { .. } => SpacebioError::Other(anyhow::anyhow!(e)),
            other => SpacebioError::upstream(Service::RelationalStore, other),
        }
    }
}
