//! Board projection: what each of the 64 squares currently shows.
//!
//! The view is a plain data model the host paints from. It mirrors the rules
//! engine's position (piece icons plus drag-source bindings) and carries the
//! purely visual state layered on top: selection, legal-move highlights, the
//! hovered drop target, and puzzle success/failure markers.
//!
//! Two ways to bring it in sync with the engine:
//! - [`BoardView::render_full`] repaints every square.
//! - [`BoardView::render_incremental`] repaints only the squares one move
//!   touched. It must always leave the view identical to a full render.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::consts::PIECE_ICON_DIR;
use crate::coords::Square;
use crate::rules::{Color, MoveResult, Piece, PieceKind, RulesEngine};

/// Puzzle feedback drawn on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// The played move matched the solution. Stays until the next puzzle load.
    Correct,
    /// The played move was wrong. Cleared when the move is reverted.
    Wrong,
}

/// Visual content of one square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Piece drawn on the square.
    pub piece: Option<Piece>,
    /// Square the piece's drag handler is bound to; `None` when empty.
    pub drag_source: Option<Square>,
    /// This square holds the selected piece.
    pub selected: bool,
    /// This square is a legal destination of the selected piece.
    pub legal_target: bool,
    /// A dragged piece is hovering over this square.
    pub hover: bool,
    pub marker: Option<Marker>,
}

impl Cell {
    /// Icon path for the piece on this square.
    #[must_use]
    pub fn icon(&self) -> Option<String> {
        self.piece.map(icon_path)
    }
}

/// The rendered 8x8 board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    cells: [Cell; 64],
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardView {
    /// An empty, unrendered board.
    #[must_use]
    pub fn new() -> Self {
        Self { cells: std::array::from_fn(|_| Cell::default()) }
    }

    #[must_use]
    pub fn cell(&self, square: Square) -> &Cell {
        &self.cells[square.index()]
    }

    fn cell_mut(&mut self, square: Square) -> &mut Cell {
        &mut self.cells[square.index()]
    }

    // --- Piece layer ---

    /// Repaint every square from the engine's position.
    pub fn render_full<R: RulesEngine + ?Sized>(&mut self, rules: &R) {
        let grid = rules.grid();
        for sq in Square::all() {
            let piece = grid[usize::from(sq.row())][usize::from(sq.col())];
            self.place(sq, piece);
        }
    }

    /// Repaint only the squares a single move touched, returning them.
    ///
    /// `origin` is cleared and `destination` takes whatever the engine now
    /// reports there (so promotions show up without special handling). The
    /// move's collateral squares (castling rook, en passant victim) are
    /// re-synced too. `restore` re-syncs one extra square; the puzzle revert
    /// path uses it to bring back a captured piece.
    pub fn render_incremental<R: RulesEngine + ?Sized>(
        &mut self,
        rules: &R,
        origin: Square,
        destination: Square,
        result: &MoveResult,
        restore: Option<Square>,
    ) -> Vec<Square> {
        let mut touched: Vec<Square> = Vec::with_capacity(4);
        let candidates = [origin, destination]
            .into_iter()
            .chain(result.collateral.iter().copied())
            .chain(restore);
        for sq in candidates {
            if !touched.contains(&sq) {
                touched.push(sq);
            }
        }

        for &sq in &touched {
            self.place(sq, rules.piece_at(sq));
        }
        touched
    }

    /// Set a square's piece and rebind its drag source.
    fn place(&mut self, square: Square, piece: Option<Piece>) {
        let cell = self.cell_mut(square);
        cell.piece = piece;
        cell.drag_source = piece.map(|_| square);
    }

    /// The piece layer as a grid, row 0 = rank 8.
    #[must_use]
    pub fn pieces(&self) -> [[Option<Piece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        for sq in Square::all() {
            grid[usize::from(sq.row())][usize::from(sq.col())] = self.cell(sq).piece;
        }
        grid
    }

    // --- Selection layer ---

    /// Mark `origin` as selected and exactly `targets` as legal destinations.
    pub fn show_selection(&mut self, origin: Square, targets: &[Square]) {
        self.clear_highlights();
        self.cell_mut(origin).selected = true;
        for &sq in targets {
            self.cell_mut(sq).legal_target = true;
        }
    }

    /// Remove the selection and all legal-move highlights.
    pub fn clear_highlights(&mut self) {
        for cell in &mut self.cells {
            cell.selected = false;
            cell.legal_target = false;
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<Square> {
        Square::all().find(|&sq| self.cell(sq).selected)
    }

    /// Squares currently highlighted as legal destinations, in visual order.
    #[must_use]
    pub fn highlighted(&self) -> Vec<Square> {
        Square::all().filter(|&sq| self.cell(sq).legal_target).collect()
    }

    /// Move the drop-target hover to `square`, or clear it.
    pub fn set_hover(&mut self, square: Option<Square>) {
        for cell in &mut self.cells {
            cell.hover = false;
        }
        if let Some(sq) = square {
            self.cell_mut(sq).hover = true;
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<Square> {
        Square::all().find(|&sq| self.cell(sq).hover)
    }

    // --- Marker layer ---

    pub fn set_marker(&mut self, square: Square, marker: Marker) {
        self.cell_mut(square).marker = Some(marker);
    }

    /// Clear `square`'s marker if it is `marker`.
    pub fn clear_marker(&mut self, square: Square, marker: Marker) {
        let cell = self.cell_mut(square);
        if cell.marker == Some(marker) {
            cell.marker = None;
        }
    }

    pub fn clear_markers(&mut self) {
        for cell in &mut self.cells {
            cell.marker = None;
        }
    }

    #[must_use]
    pub fn marker(&self, square: Square) -> Option<Marker> {
        self.cell(square).marker
    }
}

// =============================================================
// Piece icons
// =============================================================

/// Icon file stem for each piece kind. The knight asset is named "horse".
#[must_use]
pub fn icon_name(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::Pawn => "pawn",
        PieceKind::Knight => "horse",
        PieceKind::Bishop => "bishop",
        PieceKind::Rook => "rook",
        PieceKind::Queen => "queen",
        PieceKind::King => "king",
    }
}

/// Icon path for a piece, e.g. `/pieces/w_queen.svg`.
#[must_use]
pub fn icon_path(piece: Piece) -> String {
    let prefix = match piece.color {
        Color::White => 'w',
        Color::Black => 'b',
    };
    format!("{PIECE_ICON_DIR}/{prefix}_{}.svg", icon_name(piece.kind))
}
