//! # Gift Draw Server
//!
//! HTTP API for the Gift Draw engine, built on Axum.
//!
//! ## Overview
//!
//! - [`config`] - Layered configuration (defaults, `giftdraw.toml`, `GIFTDRAW_*`)
//! - [`router`] - Route table with CORS and request tracing
//! - [`handlers`] - Endpoint handlers mapping engine outcomes to JSON
//! - [`server`] - Backend selection and the serve loop
//!
//! The router is generic over the store backend, so tests drive it with an
//! in-memory store through `tower::ServiceExt` without opening a socket.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use config::{Backend, ServerConfig};
pub use error::{ApiError, ServerError};
pub use router::build_router;
pub use server::{build_app, start_server};
