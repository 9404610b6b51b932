//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS open for the
//! separately hosted front-end.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use giftdraw::store::Store;
use giftdraw::DrawEngine;

use crate::handlers;

/// Build the complete router over a draw engine.
///
/// The router includes:
/// - `GET /draw`, `POST /draw` -- draw or replay
/// - `GET /pairs` -- pair report (admin)
/// - `POST /reset` -- clear all assignments (admin)
/// - `GET /participants` -- public status list
/// - `GET /health` -- liveness
pub fn build_router<S: Store + 'static>(engine: DrawEngine<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/draw",
            get(handlers::draw_get::<S>).post(handlers::draw_post::<S>),
        )
        .route("/pairs", get(handlers::pairs::<S>))
        .route("/reset", post(handlers::reset::<S>))
        .route("/participants", get(handlers::participants::<S>))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}
