use std::fmt;

use thiserror::Error;

/// External service a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Inference,
    RelationalStore,
    GraphStore,
    PageFetch,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Inference       => "inference API",
            Service::RelationalStore => "relational store",
            Service::GraphStore      => "graph store",
            Service::PageFetch       => "page fetch",
        };
        f.write_str(name)
    }
}

/// Coarse classification used by transports (HTTP status, CLI exit codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Upstream,
    UnexpectedResponse,
    Internal,
}

#[derive(Debug, Error)]
pub enum SpacebioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("{service} error: {message}")]
    Upstream { service: Service, message: String },

    #[error("Unexpected {service} response: {message}")]
    UnexpectedResponse { service: Service, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpacebioError {
    pub fn validation(message: impl Into<String>) -> Self {
        SpacebioError::Validation(message.into())
    }

    pub fn upstream(service: Service, message: impl fmt::Display) -> Self {
        SpacebioError::Upstream { service, message: message.to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SpacebioError::Config(_)                  => ErrorKind::Config,
            SpacebioError::Validation(_)              => ErrorKind::Validation,
            SpacebioError::Upstream { .. }            => ErrorKind::Upstream,
            SpacebioError::UnexpectedResponse { .. }  => ErrorKind::UnexpectedResponse,
            SpacebioError::Serialization(_)
            | SpacebioError::Other(_)                 => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpacebioError>;
