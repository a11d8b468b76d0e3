//! Connection pool setup.

use std::time::Duration;

use secrecy::ExposeSecret;
use spacebio_config::DatabaseSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::error::Result;

/// Open the process-wide pool. Created once at start-up and shared by clone.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(settings.url.expose_secret())
        .await?;

    info!(max_connections = settings.max_connections, "Connected to Postgres");
    Ok(pool)
}
