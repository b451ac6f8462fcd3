//! Puzzle-set download from the relay.

use board::puzzle::{PuzzleError, PuzzleSet, parse_feed};
use serde_json::Value;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay returned HTTP {status}: {message}")]
    Relay { status: u16, message: String },
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

/// The relay's puzzle endpoint with the difficulty window applied.
#[must_use]
pub fn puzzles_url(base_url: &str, min: i64, max: i64) -> String {
    format!("{}/api/puzzles?min={min}&max={max}", base_url.trim_end_matches('/'))
}

/// Pull the message out of a relay error body, falling back to the raw text.
#[must_use]
pub fn relay_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}

/// Download and parse a puzzle set.
///
/// # Errors
///
/// Fails on transport errors, non-success statuses, and feeds with no
/// usable records.
pub async fn fetch_puzzle_set(client: &reqwest::Client, url: &str) -> Result<PuzzleSet, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::Relay { status: status.as_u16(), message: relay_error_message(&body) });
    }
    let set = PuzzleSet::new(parse_feed(&body)?)?;
    info!(count = set.len(), "puzzle set downloaded");
    Ok(set)
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
