//! Gift Draw server entry point.
//!
//! Initializes logging, loads configuration, opens the configured store,
//! and serves the HTTP API until Ctrl-C.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use giftdraw_server::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("giftdraw-server starting");

    let config = ServerConfig::load().context("loading configuration")?;
    info!(?config, "configuration loaded");

    start_server(&config).await.context("running server")?;

    Ok(())
}
