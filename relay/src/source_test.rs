use super::*;

#[test]
fn parse_upstream_reads_daily_puzzle_shape() {
    let body = r#"{
        "title": "Queen Sac",
        "url": "https://www.chess.com/forum/view/daily-puzzles/x",
        "publish_time": 1700000000,
        "fen": "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 2 3",
        "pgn": "[Event \"x\"]\n\n1. d1h5",
        "image": "https://www.chess.com/dynboard?fen=x"
    }"#;
    let puzzle = parse_upstream(body).unwrap();
    assert!(puzzle.fen.starts_with("r1bqkbnr"));
    assert_eq!(puzzle.pgn, "[Event \"x\"]\n\n1. d1h5");
    assert_eq!(puzzle.rating, None);
}

#[test]
fn parse_upstream_keeps_rating_when_present() {
    let puzzle = parse_upstream(r#"{"fen":"f","pgn":"p","rating":1820}"#).unwrap();
    assert_eq!(puzzle.rating, Some(1820));
}

#[test]
fn parse_upstream_rejects_missing_fields() {
    assert!(matches!(parse_upstream(r#"{"fen":"f"}"#), Err(RelayError::Parse(_))));
    assert!(matches!(parse_upstream("<html>"), Err(RelayError::Parse(_))));
}

#[test]
fn client_builds_with_timeout() {
    assert!(ChessComSource::new("http://127.0.0.1:1/puzzle", Duration::from_secs(1)).is_ok());
}
