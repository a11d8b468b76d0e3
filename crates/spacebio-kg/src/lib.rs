//! Graph mirror of publication relationships.
//!
//! Publications are merged by id; organisms, hazards and assays become
//! name-keyed nodes linked by STUDIES, HAS_HAZARD and USED_ASSAY.

pub mod client;
pub mod cypher;
pub mod error;

use async_trait::async_trait;
use spacebio_common::PublicationRecord;

pub use client::{http_base_from_uri, Neo4jClient};
pub use cypher::Statement;
pub use error::{KgError, Result};

/// Graph store operations used by ingestion and the HTTP probes.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// MERGE the publication node and its relationship targets.
    async fn upsert_publication(&self, record: &PublicationRecord) -> Result<()>;

    /// Round-trip a constant through the database.
    async fn ping(&self) -> Result<String>;

    /// Create uniqueness constraints if they are missing.
    async fn ensure_constraints(&self) -> Result<()>;
}
