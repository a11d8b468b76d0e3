//! spacebio web server
//!
//! Run with: cargo run -p spacebio-web

use std::sync::Arc;

use anyhow::Context;
use spacebio_config::Settings;
use spacebio_db::{database, PgPublicationStore};
use spacebio_inference::HfInferenceClient;
use spacebio_kg::Neo4jClient;
use spacebio_web::{router::build_router, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    spacebio_config::load_dotenv();
    spacebio_common::telemetry::init_tracing("info")?;

    let settings = Settings::from_env().context("Invalid configuration")?;

    let pool = database::connect(&settings.database)
        .await
        .context("Failed to connect to Postgres")?;
    let store = PgPublicationStore::new(pool, settings.database.embedding_dim);
    let graph = Neo4jClient::new(&settings.graph).context("Failed to build Neo4j client")?;
    let inference = HfInferenceClient::new(&settings.inference)
        .context("Failed to build inference client")?;

    let state = AppState::new(
        Arc::new(inference),
        Arc::new(store),
        Arc::new(graph),
        settings.inference.summary_max_length,
    );
    let app = build_router(state, Some(settings.server.frontend_dir.as_path()));

    let addr = settings.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
