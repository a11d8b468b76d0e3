//! Tracing bootstrap shared by the server and CLI binaries.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing to stderr.
///
/// `RUST_LOG` wins over `default_directive` when set.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}
