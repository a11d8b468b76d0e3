use anyhow::{Context, Result};
use clap::Args;
use spacebio_config::DatabaseSettings;
use spacebio_db::{database, schema};
use spacebio_kg::{cypher, GraphStore};
use tracing::info;

use super::graph_store;

#[derive(Args)]
pub struct InitSchemaArgs {
    /// Execute against the configured stores instead of printing
    #[arg(long)]
    pub apply: bool,

    /// Embedding dimension for the vector column when printing
    #[arg(long, env = "EMBEDDING_DIM", default_value_t = 384)]
    pub dim: usize,
}

pub async fn run(args: InitSchemaArgs) -> Result<()> {
    if !args.apply {
        println!("-- Postgres");
        print!("{}", schema::script(args.dim));
        println!();
        println!("// Neo4j");
        for stmt in cypher::constraints() {
            println!("{};", stmt.statement);
        }
        return Ok(());
    }

    let settings = DatabaseSettings::from_env()?;
    let pool = database::connect(&settings)
        .await
        .context("Failed to connect to Postgres")?;
    schema::apply(&pool, settings.embedding_dim).await?;

    graph_store()?.ensure_constraints().await?;
    info!("Schema initialised");
    Ok(())
}
