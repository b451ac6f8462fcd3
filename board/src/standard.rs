//! Standard chess rules backed by `shakmaty`.

#[cfg(test)]
#[path = "standard_test.rs"]
mod standard_test;

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, File, Move, Position, Role};

use crate::consts::PROMOTION;
use crate::coords::{Square, to_square};
use crate::rules::{Color, MoveAttempt, MoveResult, Piece, PieceKind, RulesEngine, RulesError};

/// Half-moves without capture or pawn move after which the game is drawn.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that make a repetition draw.
const REPETITION_DRAW_COUNT: usize = 3;

/// A move that was played, with the position it was played from.
struct Played {
    before: Chess,
    result: MoveResult,
}

/// What makes two positions "the same" for repetition purposes: placement,
/// side to move, and the set of available moves (which covers castling and
/// en passant rights).
#[derive(PartialEq, Eq)]
struct RepetitionKey {
    board: shakmaty::Board,
    turn: shakmaty::Color,
    moves: Vec<Move>,
}

impl RepetitionKey {
    fn of(pos: &Chess) -> Self {
        Self {
            board: pos.board().clone(),
            turn: pos.turn(),
            moves: pos.legal_moves().into_iter().collect(),
        }
    }
}

/// Rules engine over a `shakmaty::Chess` position with an undo stack and SAN log.
pub struct StandardRules {
    position: Chess,
    played: Vec<Played>,
    history: Vec<String>,
    /// Repetition keys of every position since the last load, current last.
    seen: Vec<RepetitionKey>,
}

impl Default for StandardRules {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl StandardRules {
    /// Engine at the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine at the position described by `fen`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidFen`] when `fen` is not a legal position.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        parse_fen(fen).map(Self::from_position)
    }

    fn from_position(position: Chess) -> Self {
        let seen = vec![RepetitionKey::of(&position)];
        Self { position, played: Vec::new(), history: Vec::new(), seen }
    }

    fn find_move(&self, attempt: MoveAttempt) -> Option<Move> {
        let from = to_shakmaty(attempt.from);
        let to = to_shakmaty(attempt.to);
        let promotion = to_role(attempt.promotion);
        self.position
            .legal_moves()
            .into_iter()
            .find(|m| endpoints(m) == Some((from, to)) && m.promotion().map_or(true, |r| r == promotion))
    }

    /// Describe `m` as played from the current position, including its SAN.
    fn annotate(&self, m: &Move) -> Option<(MoveResult, Chess)> {
        let (from, to) = endpoints(m)?;
        let san = San::from_move(&self.position, m.clone());
        let after = match self.position.clone().play(m.clone()) {
            Ok(after) => after,
            Err(_) => return None,
        };
        let suffix = if after.is_checkmate() {
            "#"
        } else if after.is_check() {
            "+"
        } else {
            ""
        };

        let result = MoveResult {
            from: from_shakmaty(from),
            to: from_shakmaty(to),
            color: from_color(self.position.turn()),
            piece: from_role(m.role()),
            captured: m.capture().map(from_role),
            promotion: m.promotion().map(from_role),
            collateral: collateral(m),
            san: format!("{san}{suffix}"),
        };
        Some((result, after))
    }

    fn is_threefold(&self) -> bool {
        let Some(current) = self.seen.last() else {
            return false;
        };
        self.seen.iter().filter(|k| *k == current).count() >= REPETITION_DRAW_COUNT
    }
}

impl RulesEngine for StandardRules {
    fn load(&mut self, fen: &str) -> Result<(), RulesError> {
        *self = Self::from_position(parse_fen(fen)?);
        Ok(())
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_shakmaty(square))
            .map(|p| Piece::new(from_color(p.color), from_role(p.role)))
    }

    fn legal_moves_from(&self, from: Square) -> Vec<MoveResult> {
        let origin = to_shakmaty(from);
        self.position
            .legal_moves()
            .into_iter()
            .filter(|m| endpoints(m).is_some_and(|(f, _)| f == origin))
            .filter(|m| m.promotion().map_or(true, |r| r == to_role(PROMOTION)))
            .filter_map(|m| self.annotate(&m).map(|(result, _)| result))
            .collect()
    }

    fn play(&mut self, attempt: MoveAttempt) -> Option<MoveResult> {
        let m = self.find_move(attempt)?;
        let (result, after) = self.annotate(&m)?;
        let before = std::mem::replace(&mut self.position, after);
        self.history.push(result.san.clone());
        self.seen.push(RepetitionKey::of(&self.position));
        self.played.push(Played { before, result: result.clone() });
        Some(result)
    }

    fn turn(&self) -> Color {
        from_color(self.position.turn())
    }

    fn in_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_draw(&self) -> bool {
        self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.is_threefold()
    }

    fn history(&self) -> &[String] {
        &self.history
    }

    fn undo(&mut self) -> Option<MoveResult> {
        let played = self.played.pop()?;
        self.position = played.before;
        self.history.pop();
        self.seen.pop();
        Some(played.result)
    }
}

// =============================================================
// Conversions
// =============================================================

fn parse_fen(fen: &str) -> Result<Chess, RulesError> {
    let invalid = |reason: String| RulesError::InvalidFen { fen: fen.to_owned(), reason };
    let parsed = fen.trim().parse::<Fen>().map_err(|e| invalid(e.to_string()))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| invalid(e.to_string()))
}

fn to_shakmaty(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(u32::from(square.col())),
        shakmaty::Rank::new(u32::from(7 - square.row())),
    )
}

fn from_shakmaty(square: shakmaty::Square) -> Square {
    to_square(7 - square.rank() as u8, square.file() as u8)
}

fn from_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn to_role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}

/// Origin and destination as a user would enter them. Castling is the king's
/// two-square step, not king-takes-rook.
fn endpoints(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
    match *m {
        Move::Normal { from, to, .. } | Move::EnPassant { from, to } => Some((from, to)),
        Move::Castle { king, rook } => {
            let file = if is_kingside(king, rook) { File::G } else { File::C };
            Some((king, shakmaty::Square::from_coords(file, king.rank())))
        }
        Move::Put { .. } => None,
    }
}

fn collateral(m: &Move) -> Vec<Square> {
    match *m {
        Move::Castle { king, rook } => {
            let rook_to = if is_kingside(king, rook) { File::F } else { File::D };
            vec![
                from_shakmaty(rook),
                from_shakmaty(shakmaty::Square::from_coords(rook_to, king.rank())),
            ]
        }
        Move::EnPassant { from, to } => {
            vec![from_shakmaty(shakmaty::Square::from_coords(to.file(), from.rank()))]
        }
        Move::Normal { .. } | Move::Put { .. } => Vec::new(),
    }
}

fn is_kingside(king: shakmaty::Square, rook: shakmaty::Square) -> bool {
    (rook.file() as u8) > (king.file() as u8)
}
