//! Shared constants for the board crate.

use std::time::Duration;

use crate::rules::PieceKind;

// ── History ─────────────────────────────────────────────────────

/// Pre-allocated rows in the move-history table (two plies per row).
pub const HISTORY_ROWS: usize = 60;

// ── Puzzles ─────────────────────────────────────────────────────

/// How long a wrong puzzle move stays on the board before it is reverted.
pub const REVERT_DELAY: Duration = Duration::from_millis(1000);

/// Rating assigned to a puzzle record that carries none.
pub const DEFAULT_PUZZLE_RATING: i64 = 1500;

// ── Moves ───────────────────────────────────────────────────────

/// Piece every promoting pawn becomes; there is no underpromotion.
pub const PROMOTION: PieceKind = PieceKind::Queen;

// ── Pieces ──────────────────────────────────────────────────────

/// Directory the piece icons are served from.
pub const PIECE_ICON_DIR: &str = "/pieces";
