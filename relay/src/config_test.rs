use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> RelayConfig {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    RelayConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    assert_eq!(config_from(&[]), RelayConfig::default());
    let cfg = config_from(&[]);
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.source_url, "https://api.chess.com/pub/puzzle");
    assert_eq!(cfg.batch_size, 20);
    assert_eq!(cfg.request_timeout, Duration::from_secs(10));
}

#[test]
fn overrides_are_parsed() {
    let cfg = config_from(&[
        ("PORT", "8080"),
        ("PUZZLE_SOURCE_URL", "http://localhost:9000/puzzle"),
        ("PUZZLE_BATCH_SIZE", "5"),
        ("RELAY_REQUEST_TIMEOUT_SECS", " 3 "),
    ]);
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.source_url, "http://localhost:9000/puzzle");
    assert_eq!(cfg.batch_size, 5);
    assert_eq!(cfg.request_timeout, Duration::from_secs(3));
}

#[test]
fn garbage_numbers_fall_back_to_defaults() {
    let cfg = config_from(&[("PORT", "eighty"), ("PUZZLE_BATCH_SIZE", "-2"), ("RELAY_REQUEST_TIMEOUT_SECS", "")]);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.batch_size, DEFAULT_PUZZLE_BATCH_SIZE);
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
}

#[test]
fn batch_size_is_at_least_one() {
    assert_eq!(config_from(&[("PUZZLE_BATCH_SIZE", "0")]).batch_size, 1);
}

#[test]
fn blank_source_url_uses_default() {
    assert_eq!(config_from(&[("PUZZLE_SOURCE_URL", "  ")]).source_url, DEFAULT_PUZZLE_SOURCE_URL);
}
