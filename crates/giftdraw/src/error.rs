//! Error types for the draw engine.

use giftdraw_core::{CoreError, InvariantViolation, ResolveError};
use giftdraw_store::StoreError;
use thiserror::Error;

/// Errors that can occur during engine operations.
///
/// Informational outcomes (an already-drawn replay, nobody left to draw)
/// are not errors; see [`DrawOutcome`](crate::DrawOutcome).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The name query was empty.
    #[error("a name is required")]
    EmptyQuery,

    /// The name query matched no participant.
    #[error("participant not found: {0}")]
    NotFound(String),

    /// A privileged operation was attempted without a valid admin key.
    #[error("not authorized")]
    Unauthorized,

    /// Persisting or loading the roster failed. Nothing was committed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The roster would break an invariant.
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    /// A roster operation was rejected.
    #[error("roster error: {0}")]
    Core(#[from] CoreError),

    /// The random source is unusable.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ResolveError> for EngineError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::EmptyQuery => EngineError::EmptyQuery,
            ResolveError::NotFound(query) => EngineError::NotFound(query),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
