//! Upstream puzzle source.
//!
//! The relay only ever needs "give me one random puzzle", so the seam is a
//! single async method. [`ChessComSource`] is the production implementation;
//! tests substitute an in-process fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

const RELAY_USER_AGENT: &str = concat!("chess-puzzle-relay/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("http client build failed: {0}")]
    ClientBuild(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },
    #[error("upstream response could not be parsed: {0}")]
    Parse(String),
    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The fields the relay reads from one upstream puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamPuzzle {
    pub fen: String,
    pub pgn: String,
    #[serde(default)]
    pub rating: Option<i64>,
}

#[async_trait]
pub trait PuzzleSource: Send + Sync {
    /// Fetch one puzzle.
    async fn fetch(&self) -> Result<UpstreamPuzzle, RelayError>;
}

/// Parse one upstream response body.
///
/// # Errors
///
/// Returns [`RelayError::Parse`] when the body is not a puzzle object.
pub fn parse_upstream(text: &str) -> Result<UpstreamPuzzle, RelayError> {
    serde_json::from_str(text).map_err(|e| RelayError::Parse(e.to_string()))
}

/// Fetches random puzzles from the chess.com public API.
pub struct ChessComSource {
    http: reqwest::Client,
    url: String,
}

impl ChessComSource {
    /// # Errors
    ///
    /// Returns [`RelayError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::ClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.into() })
    }
}

#[async_trait]
impl PuzzleSource for ChessComSource {
    async fn fetch(&self) -> Result<UpstreamPuzzle, RelayError> {
        let response = self
            .http
            .get(&self.url)
            .header(USER_AGENT, RELAY_USER_AGENT)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus { status: status.as_u16() });
        }
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;
        debug!(bytes = text.len(), "upstream puzzle fetched");
        parse_upstream(&text)
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
