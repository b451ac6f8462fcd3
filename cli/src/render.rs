//! Plain-text rendering of the board and its projections.
//!
//! Each square is three characters wide. The middle character is the piece
//! letter (uppercase white, lowercase black) or `.` when empty; the flanking
//! characters show the visual layers:
//!
//! | Layer | Look |
//! |-------|------|
//! | selected | `[N]` |
//! | legal target | `(.)` |
//! | drop hover | `{.}` |
//! | correct marker | `+N+` |
//! | wrong marker | `!N!` |

use board::coords::to_square;
use board::engine::EngineCore;
use board::game::{CaptureLog, HistoryTable};
use board::rules::{Color, Piece, PieceKind, RulesEngine};
use board::view::{BoardView, Cell, Marker};

#[must_use]
pub fn piece_letter(piece: Piece) -> char {
    let letter = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.color {
        Color::White => letter.to_ascii_uppercase(),
        Color::Black => letter,
    }
}

fn cell_text(cell: &Cell) -> String {
    let middle = cell.piece.map_or('.', piece_letter);
    let (left, right) = match cell.marker {
        Some(Marker::Correct) => ('+', '+'),
        Some(Marker::Wrong) => ('!', '!'),
        None if cell.selected => ('[', ']'),
        None if cell.hover => ('{', '}'),
        None if cell.legal_target => ('(', ')'),
        None => (' ', ' '),
    };
    format!("{left}{middle}{right}")
}

/// The 8x8 board with rank and file labels, white at the bottom.
#[must_use]
pub fn board_text(view: &BoardView) -> String {
    let files = "     a  b  c  d  e  f  g  h";
    let mut out = String::new();
    out.push_str(files);
    out.push('\n');
    for row in 0..8u8 {
        let rank = 8 - row;
        out.push_str(&format!(" {rank}  "));
        for col in 0..8u8 {
            out.push_str(&cell_text(view.cell(to_square(row, col))));
        }
        out.push_str(&format!("  {rank}\n"));
    }
    out.push_str(files);
    out
}

/// Filled history rows as `1. e4 e5`, one per line.
#[must_use]
pub fn history_text(table: &HistoryTable) -> String {
    table
        .filled_rows()
        .map(|row| format!("{:>3}. {:<8}{}", row.number, row.white, row.black).trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Both capture trays, in capture order.
#[must_use]
pub fn captures_text(log: &CaptureLog) -> String {
    let tray = |color: Color| -> String {
        let letters: Vec<String> = log
            .tray(color)
            .iter()
            .map(|&kind| piece_letter(Piece::new(color, kind)).to_string())
            .collect();
        if letters.is_empty() { "-".to_owned() } else { letters.join(" ") }
    };
    format!("captured white: {}\ncaptured black: {}", tray(Color::White), tray(Color::Black))
}

/// Everything the host shows for one controller: optional objective, the
/// board, status, captures, and history.
#[must_use]
pub fn frame<R: RulesEngine>(core: &EngineCore<R>, objective: Option<&str>) -> String {
    let mut sections = Vec::with_capacity(5);
    if let Some(objective) = objective {
        sections.push(objective.to_owned());
    }
    sections.push(board_text(&core.view));
    sections.push(core.status.to_string());
    sections.push(captures_text(&core.captures));
    let history = history_text(&core.history);
    if !history.is_empty() {
        sections.push(history);
    }
    sections.join("\n\n")
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
