//! HTTP handlers for all `/api` routes.

pub mod ingest;
pub mod search;
pub mod summarize;
pub mod system;
