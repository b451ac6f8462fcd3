//! Rules-engine seam: piece types, move attempts/results, and the capability
//! set the controller consumes.
//!
//! The controller never computes chess rules itself. Everything it needs
//! (occupancy, legal destinations, move application, game-end predicates,
//! SAN history, undo) is asked of a [`RulesEngine`]. [`crate::standard`]
//! provides the `shakmaty`-backed implementation.

use serde::{Deserialize, Serialize};

use crate::consts::PROMOTION;
use crate::coords::Square;

/// Side color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Lowercase English name, as used in status text.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// Piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A colored piece occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// A request to move whatever stands on `from` to `to`.
///
/// Promotion is always to a queen; there is no underpromotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAttempt {
    pub from: Square,
    pub to: Square,
    pub promotion: PieceKind,
}

impl MoveAttempt {
    /// Build an attempt, or `None` when origin and destination coincide.
    #[must_use]
    pub fn new(from: Square, to: Square) -> Option<Self> {
        (from != to).then_some(Self { from, to, promotion: PROMOTION })
    }
}

/// A move the rules engine accepted (or would accept).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub from: Square,
    pub to: Square,
    /// Side that made the move.
    pub color: Color,
    /// Kind of the moving piece before any promotion.
    pub piece: PieceKind,
    /// Kind of the piece removed from the board, if any.
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    /// Other squares whose occupant changes: rook squares when castling, the
    /// captured pawn's square for en passant.
    pub collateral: Vec<Square>,
    /// Standard algebraic notation including any `+`/`#` suffix.
    pub san: String,
}

impl MoveResult {
    /// The origin+destination text used for puzzle solution matching.
    #[must_use]
    pub fn coordinate_text(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

/// Errors surfaced by a rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The position text could not be parsed or describes an impossible position.
    #[error("invalid position {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// The capability set a board controller needs from a chess-rules engine.
pub trait RulesEngine {
    /// Replace the current position with one in standard board notation.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidFen`] if the text is not a legal position;
    /// the current position is left untouched in that case.
    fn load(&mut self, fen: &str) -> Result<(), RulesError>;

    /// Occupant of one square.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// The whole position as an 8x8 grid in visual order (row 0 = rank 8).
    fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for sq in Square::all() {
            grid[usize::from(sq.row())][usize::from(sq.col())] = self.piece_at(sq);
        }
        grid
    }

    /// Legal moves starting on `from`, with capture details.
    fn legal_moves_from(&self, from: Square) -> Vec<MoveResult>;

    /// Apply an attempt. `None` means the move is illegal; nothing changes.
    fn play(&mut self, attempt: MoveAttempt) -> Option<MoveResult>;

    /// Side to move.
    fn turn(&self) -> Color;

    fn in_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_draw(&self) -> bool;

    /// SAN of every move played since the last load, oldest first.
    fn history(&self) -> &[String];

    /// Take back the most recent move, returning what was undone.
    fn undo(&mut self) -> Option<MoveResult>;
}
