//! Server lifecycle: open the configured store, bind, serve until Ctrl-C.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use giftdraw::store::{FileStore, MemoryStore, SqliteStore};
use giftdraw::DrawEngine;

use crate::config::{Backend, ServerConfig};
use crate::error::ServerError;
use crate::router::build_router;

/// Open the configured backend and build the router over it.
pub fn build_app(config: &ServerConfig) -> Result<Router, ServerError> {
    let seed = config.seed_source();
    let engine_config = config.engine_config();

    let router = match config.backend {
        Backend::File => {
            let store = FileStore::open(config.data_path.clone(), seed);
            build_router(DrawEngine::new(store, engine_config))
        }
        Backend::Sqlite => {
            let store = SqliteStore::open(&config.data_path, &seed)?;
            build_router(DrawEngine::new(store, engine_config))
        }
        Backend::Memory => {
            let store = MemoryStore::seeded(&seed)?;
            build_router(DrawEngine::new(store, engine_config))
        }
    };

    info!(
        backend = ?config.backend,
        data_path = %config.data_path.display(),
        match_mode = %config.match_mode,
        strategy = %config.strategy,
        admin_enabled = config.admin_key.is_some(),
        "Store opened"
    );

    Ok(router)
}

/// Bind to the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the listener cannot
/// bind, or the server hits a fatal I/O error.
pub async fn start_server(config: &ServerConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_app(config)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, "Gift Draw server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
