//! Router assembly and handlers.
//!
//! `GET /api/puzzles` fetches a batch of upstream puzzles and answers with one
//! JSON record per line (`fen`, `moves`, `rating`). `GET /healthz` is a bare
//! liveness probe. CORS is fully open so a browser host on any origin can
//! read the feed.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use board::consts::DEFAULT_PUZZLE_RATING;
use board::puzzle::WireRecord;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::pgn::extract_moves;
use crate::source::{PuzzleSource, RelayError, UpstreamPuzzle};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PuzzleSource>,
    pub batch_size: usize,
}

impl AppState {
    pub fn new(source: Arc<dyn PuzzleSource>, batch_size: usize) -> Self {
        Self { source, batch_size }
    }
}

/// Difficulty window requested by the client. Accepted and logged; the
/// upstream source has no rating filter.
#[derive(Debug, Default, Deserialize)]
pub struct PuzzleQuery {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/puzzles", get(puzzles))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn puzzles(State(state): State<AppState>, Query(query): Query<PuzzleQuery>) -> Response {
    debug!(min = ?query.min, max = ?query.max, batch = state.batch_size, "puzzle batch requested");
    match collect_batch(state.source.as_ref(), state.batch_size).await {
        Ok(body) => ([(CONTENT_TYPE, "application/x-ndjson; charset=utf-8")], body).into_response(),
        Err(e) => {
            error!(error = %e, "puzzle batch failed");
            let body = serde_json::json!({ "error": e.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Fetch `count` puzzles one after another and encode them as NDJSON.
///
/// # Errors
///
/// Fails on the first upstream error; a partial batch is never returned.
pub async fn collect_batch(source: &dyn PuzzleSource, count: usize) -> Result<String, RelayError> {
    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        let puzzle = source.fetch().await?;
        lines.push(serde_json::to_string(&to_record(puzzle))?);
    }
    info!(count = lines.len(), "puzzle batch relayed");
    Ok(lines.join("\n"))
}

/// Reformat one upstream puzzle as a relay record.
pub fn to_record(puzzle: UpstreamPuzzle) -> WireRecord {
    WireRecord {
        moves: extract_moves(&puzzle.pgn),
        fen: puzzle.fen,
        rating: puzzle.rating.unwrap_or(DEFAULT_PUZZLE_RATING),
    }
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
