//! Command line for bulk loading and store maintenance.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{check, ingest, init_schema, load};

/// Publication ingestion tools for the spacebio stores
#[derive(Parser)]
#[command(name = "spacebio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every record of a CSV or JSON file through the full ingest path
    Ingest(ingest::IngestArgs),

    /// Bulk load a CSV or JSON file into the selected stores
    Load(load::LoadArgs),

    /// Print or apply the relational DDL and graph constraints
    InitSchema(init_schema::InitSchemaArgs),

    /// Probe both stores
    Check(check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    spacebio_config::load_dotenv();
    spacebio_common::telemetry::init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Ingest(args) => ingest::run(args).await,
        Commands::Load(args) => load::run(args).await,
        Commands::InitSchema(args) => init_schema::run(args).await,
        Commands::Check(args) => check::run(args).await,
    }
}
