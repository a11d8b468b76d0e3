//! Shared types, errors, and tracing setup used across all spacebio crates.

pub mod entities;
pub mod error;
pub mod telemetry;

// Re-export commonly used types
pub use entities::{PublicationIn, PublicationRecord, Relation, FALLBACK_EMBEDDING_TEXT};
pub use error::{ErrorKind, Result, Service, SpacebioError};
