//! Relay configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUZZLE_SOURCE_URL: &str = "https://api.chess.com/pub/puzzle";
pub const DEFAULT_PUZZLE_BATCH_SIZE: usize = 20;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    pub source_url: String,
    /// Upstream fetches per `/api/puzzles` request.
    pub batch_size: usize,
    pub request_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            source_url: DEFAULT_PUZZLE_SOURCE_URL.to_owned(),
            batch_size: DEFAULT_PUZZLE_BATCH_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl RelayConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUZZLE_SOURCE_URL`: default the chess.com random-puzzle endpoint
    /// - `PUZZLE_BATCH_SIZE`: default 20, at least 1
    /// - `RELAY_REQUEST_TIMEOUT_SECS`: default 10
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let source_url = lookup("PUZZLE_SOURCE_URL")
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_PUZZLE_SOURCE_URL.to_owned());
        let batch_size = parse_or(&lookup, "PUZZLE_BATCH_SIZE", DEFAULT_PUZZLE_BATCH_SIZE).max(1);
        let timeout_secs = parse_or(&lookup, "RELAY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS);

        Self { port, source_url, batch_size, request_timeout: Duration::from_secs(timeout_secs) }
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
