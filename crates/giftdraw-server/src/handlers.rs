//! REST endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/draw?name=` | Draw (or replay) for a participant |
//! | `POST` | `/draw` | Same, with a JSON `{ "name": ... }` body |
//! | `GET` | `/pairs` | Completed pairs and pending lists (admin) |
//! | `POST` | `/reset` | Clear every assignment (admin) |
//! | `GET` | `/participants` | Names and whether each has drawn |
//! | `GET` | `/health` | Liveness |

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use giftdraw::store::Store;
use giftdraw::{DrawEngine, DrawOutcome, PairReport, ParticipantStatus};

use crate::error::ApiError;

/// Header carrying the admin key.
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Query parameters for `GET /draw`.
#[derive(Debug, Default, Deserialize)]
pub struct DrawQuery {
    #[serde(alias = "quem")]
    pub name: Option<String>,
}

/// JSON body for `POST /draw`.
#[derive(Debug, Default, Deserialize)]
pub struct DrawRequest {
    #[serde(default, alias = "quem")]
    pub name: Option<String>,
}

/// Query parameters for privileged endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub key: Option<String>,
}

/// Body returned by `POST /reset`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub reset: bool,
    pub participants: usize,
}

// ---------------------------------------------------------------------------
// GET/POST /draw
// ---------------------------------------------------------------------------

pub async fn draw_get<S: Store>(
    State(engine): State<DrawEngine<S>>,
    Query(query): Query<DrawQuery>,
) -> Result<Json<Value>, ApiError> {
    draw(&engine, query.name.as_deref()).await
}

pub async fn draw_post<S: Store>(
    State(engine): State<DrawEngine<S>>,
    Json(request): Json<DrawRequest>,
) -> Result<Json<Value>, ApiError> {
    draw(&engine, request.name.as_deref()).await
}

async fn draw<S: Store>(engine: &DrawEngine<S>, name: Option<&str>) -> Result<Json<Value>, ApiError> {
    let outcome = engine.draw(name.unwrap_or_default()).await?;
    Ok(Json(outcome_body(&outcome)))
}

/// Client-facing body for a draw outcome.
pub fn outcome_body(outcome: &DrawOutcome) -> Value {
    match outcome {
        DrawOutcome::Assigned { target, .. } => json!({ "assigned": target }),
        DrawOutcome::AlreadyDrawn { target, .. } => {
            json!({ "alreadyDrawn": true, "target": target })
        }
        DrawOutcome::NoCandidates { .. } => json!({ "error": "no_candidates" }),
    }
}

// ---------------------------------------------------------------------------
// Privileged endpoints
// ---------------------------------------------------------------------------

/// The admin key from the header, else from `?key=`.
fn admin_key<'a>(headers: &'a HeaderMap, query: &'a AdminQuery) -> Option<&'a str> {
    headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .or(query.key.as_deref())
}

pub async fn pairs<S: Store>(
    State(engine): State<DrawEngine<S>>,
    headers: HeaderMap,
    Query(query): Query<AdminQuery>,
) -> Result<Json<PairReport>, ApiError> {
    let report = engine.report(admin_key(&headers, &query)).await?;
    Ok(Json(report))
}

pub async fn reset<S: Store>(
    State(engine): State<DrawEngine<S>>,
    headers: HeaderMap,
    Query(query): Query<AdminQuery>,
) -> Result<Json<ResetResponse>, ApiError> {
    let participants = engine.reset(admin_key(&headers, &query)).await?;
    Ok(Json(ResetResponse {
        reset: true,
        participants,
    }))
}

// ---------------------------------------------------------------------------
// Public views
// ---------------------------------------------------------------------------

pub async fn participants<S: Store>(
    State(engine): State<DrawEngine<S>>,
) -> Result<Json<Vec<ParticipantStatus>>, ApiError> {
    Ok(Json(engine.participants().await?))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_bodies() {
        let assigned = DrawOutcome::Assigned {
            drawer: "A".into(),
            target: "B".into(),
        };
        assert_eq!(outcome_body(&assigned), json!({ "assigned": "B" }));

        let replay = DrawOutcome::AlreadyDrawn {
            drawer: "A".into(),
            target: "B".into(),
        };
        assert_eq!(
            outcome_body(&replay),
            json!({ "alreadyDrawn": true, "target": "B" })
        );

        let none = DrawOutcome::NoCandidates { drawer: "C".into() };
        assert_eq!(outcome_body(&none), json!({ "error": "no_candidates" }));
    }

    #[test]
    fn test_admin_key_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_KEY_HEADER, "from-header".parse().unwrap());
        let query = AdminQuery {
            key: Some("from-query".into()),
        };
        assert_eq!(admin_key(&headers, &query), Some("from-header"));
        assert_eq!(admin_key(&HeaderMap::new(), &query), Some("from-query"));
        assert_eq!(admin_key(&HeaderMap::new(), &AdminQuery::default()), None);
    }
}
