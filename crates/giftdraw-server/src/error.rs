//! Error types for the HTTP layer.
//!
//! [`ApiError`] wraps engine failures and converts them into the JSON error
//! bodies clients rely on via its [`IntoResponse`] implementation.
//! [`ServerError`] covers startup and serving.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use giftdraw::EngineError;

/// A request-level failure.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub EngineError);

impl ApiError {
    /// HTTP status and stable error code for this failure.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            EngineError::EmptyQuery => (StatusCode::BAD_REQUEST, "name_required"),
            EngineError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            EngineError::Unauthorized => (StatusCode::FORBIDDEN, "unauthorized"),
            EngineError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "persistence_failure"),
            EngineError::Invariant(_) | EngineError::Core(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "invalid_state")
            }
            EngineError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = serde_json::json!({ "error": code });
        (status, Json(body)).into_response()
    }
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// The store backend could not be opened.
    #[error("store error: {0}")]
    Store(#[from] giftdraw::store::StoreError),

    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftdraw::store::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EngineError::EmptyQuery, StatusCode::BAD_REQUEST, "name_required"),
            (EngineError::NotFound("x".into()), StatusCode::NOT_FOUND, "not_found"),
            (EngineError::Unauthorized, StatusCode::FORBIDDEN, "unauthorized"),
            (
                EngineError::Store(StoreError::Task("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_failure",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(ApiError(err).status_and_code(), (status, code));
        }
    }
}
