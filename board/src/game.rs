//! Game projections derived from the rules engine after each move: the
//! move-history table, the capture trays, and the status banner.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use std::fmt;

use crate::consts::HISTORY_ROWS;
use crate::rules::{Color, MoveResult, Piece, PieceKind, RulesEngine};
use crate::view::icon_path;

// =============================================================
// History table
// =============================================================

/// One numbered row of the history table: a white ply and a black ply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryRow {
    /// 1-based move number.
    pub number: usize,
    pub white: String,
    pub black: String,
}

/// Fixed-size move-history table with pre-allocated rows.
///
/// Row `i` holds plies `2i` and `2i + 1`. Plies beyond the table's capacity
/// are not shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTable {
    rows: Vec<HistoryRow>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        let rows = (1..=HISTORY_ROWS)
            .map(|number| HistoryRow { number, ..HistoryRow::default() })
            .collect();
        Self { rows }
    }

    /// Rewrite every row from the engine's full SAN list.
    pub fn sync(&mut self, history: &[String]) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.white = history.get(i * 2).cloned().unwrap_or_default();
            row.black = history.get(i * 2 + 1).cloned().unwrap_or_default();
        }
    }

    /// Empty every row.
    pub fn clear(&mut self) {
        self.sync(&[]);
    }

    #[must_use]
    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&HistoryRow> {
        self.rows.get(index)
    }

    /// Rows with at least one ply written.
    pub fn filled_rows(&self) -> impl Iterator<Item = &HistoryRow> {
        self.rows.iter().take_while(|r| !r.white.is_empty())
    }

    /// Number of plies the table can show.
    #[must_use]
    pub fn ply_capacity(&self) -> usize {
        self.rows.len() * 2
    }
}

// =============================================================
// Capture trays
// =============================================================

/// Captured pieces, one append-only tray per captured-piece color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureLog {
    white: Vec<PieceKind>,
    black: Vec<PieceKind>,
}

impl CaptureLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the piece a move captured, if any, to the tray of its color.
    pub fn record(&mut self, result: &MoveResult) -> Option<Piece> {
        let kind = result.captured?;
        let color = result.color.opposite();
        match color {
            Color::White => self.white.push(kind),
            Color::Black => self.black.push(kind),
        }
        Some(Piece::new(color, kind))
    }

    /// Pieces of `color` that have been captured, in capture order.
    #[must_use]
    pub fn tray(&self, color: Color) -> &[PieceKind] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Icon paths for one tray, in capture order.
    #[must_use]
    pub fn icons(&self, color: Color) -> Vec<String> {
        self.tray(color).iter().map(|&kind| icon_path(Piece::new(color, kind))).collect()
    }

    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }
}

// =============================================================
// Status banner
// =============================================================

/// The one message the status banner shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Checkmate { winner: Color },
    Draw,
    Check { side: Color },
    Turn { side: Color },
}

impl Status {
    /// Evaluate the engine's predicates: checkmate, then draw, then check,
    /// then whose turn it is.
    #[must_use]
    pub fn from_rules<R: RulesEngine + ?Sized>(rules: &R) -> Self {
        let side = rules.turn();
        if rules.is_checkmate() {
            Self::Checkmate { winner: side.opposite() }
        } else if rules.is_stalemate() || rules.is_draw() {
            Self::Draw
        } else if rules.in_check() {
            Self::Check { side }
        } else {
            Self::Turn { side }
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkmate { winner } => write!(f, "Checkmate: {} wins", title(*winner)),
            Self::Draw => f.write_str("Draw"),
            Self::Check { side } => write!(f, "{} is in check", title(*side)),
            Self::Turn { side } => write!(f, "{} to move", title(*side)),
        }
    }
}

fn title(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
