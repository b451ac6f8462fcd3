//! Move extraction from game-notation text.
//!
//! Header lines (`[Tag "value"]`) are dropped, every run of digits followed
//! by a dot (`1.`, `12.`) is removed, and the remaining tokens are joined with
//! no separator. The result is the `moves` field of a relay record.

/// Extract the concatenated move text from a PGN body.
#[must_use]
pub fn extract_moves(pgn: &str) -> String {
    let body = pgn
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .collect::<Vec<_>>()
        .join(" ");
    strip_move_numbers(&body).split_whitespace().collect()
}

fn strip_move_numbers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut digits = String::new();
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if ch == '.' && !digits.is_empty() {
            digits.clear();
            continue;
        }
        out.push_str(&digits);
        digits.clear();
        out.push(ch);
    }
    out.push_str(&digits);
    out
}

#[cfg(test)]
#[path = "pgn_test.rs"]
mod tests;
