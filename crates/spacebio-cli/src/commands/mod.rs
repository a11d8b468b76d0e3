//! Subcommand implementations.

pub mod check;
pub mod ingest;
pub mod init_schema;
pub mod load;

use std::sync::Arc;

use anyhow::{Context, Result};
use spacebio_config::{DatabaseSettings, GraphSettings, InferenceSettings};
use spacebio_db::{database, PgPublicationStore};
use spacebio_inference::HfInferenceClient;
use spacebio_kg::Neo4jClient;

pub(crate) async fn relational_store() -> Result<Arc<PgPublicationStore>> {
    let settings = DatabaseSettings::from_env()?;
    let pool = database::connect(&settings)
        .await
        .context("Failed to connect to Postgres")?;
    Ok(Arc::new(PgPublicationStore::new(pool, settings.embedding_dim)))
}

pub(crate) fn graph_store() -> Result<Arc<Neo4jClient>> {
    let settings = GraphSettings::from_env()?;
    Ok(Arc::new(Neo4jClient::new(&settings)?))
}

pub(crate) fn inference_client() -> Result<Arc<HfInferenceClient>> {
    let settings = InferenceSettings::from_env()?;
    Ok(Arc::new(HfInferenceClient::new(&settings)?))
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
