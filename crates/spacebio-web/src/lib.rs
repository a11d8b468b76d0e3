//! HTTP surface for ingest, summarize, search and probes.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
