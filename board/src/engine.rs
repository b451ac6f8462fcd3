use tracing::debug;

use crate::coords::Square;
use crate::game::{CaptureLog, HistoryTable, Status};
use crate::input::{Effect, InputEvent, InputState, settle, transition};
use crate::rules::{MoveResult, Piece, RulesEngine, RulesError};
use crate::view::BoardView;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Every square was repainted.
    BoardRendered,
    /// These squares were repainted.
    SquaresChanged(Vec<Square>),
    /// The selection moved (or was cleared).
    SelectionChanged(Option<Square>),
    /// The drop-target hover moved (or was cleared).
    HoverChanged(Option<Square>),
    /// A drag was refused; the host should cancel it.
    DragRefused(Square),
    /// The rules engine accepted a move.
    MoveApplied(MoveResult),
    /// A move was taken back.
    MoveReverted(MoveResult),
    /// A captured piece was appended to its tray.
    PieceCaptured(Piece),
    /// The history table was rewritten.
    HistoryChanged,
    /// The status banner changed.
    StatusChanged(Status),
    /// A puzzle position was loaded.
    PuzzleLoaded { index: usize, objective: String },
    /// The played move matched the puzzle solution.
    PuzzleSolved { square: Square },
    /// The played move did not match; it will be reverted after the delay.
    PuzzleMissed { square: Square },
}

/// The board controller: one rules engine plus every projection of it.
///
/// Holds no global state, so independent boards can live side by side.
pub struct EngineCore<R: RulesEngine> {
    pub rules: R,
    pub view: BoardView,
    pub input: InputState,
    pub history: HistoryTable,
    pub captures: CaptureLog,
    pub status: Status,
}

impl<R: RulesEngine> EngineCore<R> {
    /// A controller with the board rendered from `rules`' current position.
    #[must_use]
    pub fn new(rules: R) -> Self {
        let mut core = Self::unrendered(rules);
        core.view.render_full(&core.rules);
        core
    }

    /// A controller whose board has not been drawn yet.
    #[must_use]
    pub fn unrendered(rules: R) -> Self {
        let status = Status::from_rules(&rules);
        Self {
            rules,
            view: BoardView::new(),
            input: InputState::Idle,
            history: HistoryTable::new(),
            captures: CaptureLog::new(),
            status,
        }
    }

    // --- Input events ---

    /// Feed one pointer event through the selection state machine.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        let (next, effects) = transition(self.input, event, &self.rules);
        debug!(?event, from = ?self.input, to = ?next, "input transition");
        self.input = next;

        let mut actions = Vec::new();
        for effect in effects {
            self.apply_effect(effect, &mut actions);
        }
        actions
    }

    fn apply_effect(&mut self, effect: Effect, actions: &mut Vec<Action>) {
        match effect {
            Effect::Select { origin, targets } => {
                self.view.show_selection(origin, &targets);
                actions.push(Action::SelectionChanged(Some(origin)));
            }
            Effect::Deselect => {
                self.view.clear_highlights();
                actions.push(Action::SelectionChanged(None));
            }
            Effect::Hover(square) => {
                self.view.set_hover(square);
                actions.push(Action::HoverChanged(square));
            }
            Effect::DragRefused(square) => actions.push(Action::DragRefused(square)),
            Effect::Attempt { attempt, gesture } => {
                let result = self.rules.play(attempt);
                debug!(from = %attempt.from, to = %attempt.to, accepted = result.is_some(), "move attempt");
                let (next, effects) = settle(self.input, gesture, result.is_some());
                self.input = next;
                for effect in effects {
                    self.apply_effect(effect, actions);
                }
                if let Some(result) = result {
                    self.apply_move(result, actions);
                }
            }
        }
    }

    /// Project an accepted move onto the trays, board, history, and status.
    fn apply_move(&mut self, result: MoveResult, actions: &mut Vec<Action>) {
        if let Some(piece) = self.captures.record(&result) {
            actions.push(Action::PieceCaptured(piece));
        }
        let touched = self
            .view
            .render_incremental(&self.rules, result.from, result.to, &result, None);
        actions.push(Action::SquaresChanged(touched));
        self.history.sync(self.rules.history());
        actions.push(Action::HistoryChanged);
        actions.push(self.refresh_status());
        actions.push(Action::MoveApplied(result));
    }

    fn refresh_status(&mut self) -> Action {
        self.status = Status::from_rules(&self.rules);
        Action::StatusChanged(self.status)
    }

    // --- Position changes outside user input ---

    /// Load a new position and reset every projection.
    ///
    /// # Errors
    ///
    /// Returns the rules engine's error if `fen` is rejected; nothing changes
    /// in that case.
    pub fn load_position(&mut self, fen: &str) -> Result<Vec<Action>, RulesError> {
        self.rules.load(fen)?;
        self.input = InputState::Idle;
        self.view.clear_highlights();
        self.view.clear_markers();
        self.view.set_hover(None);
        self.history.clear();
        self.captures.clear();
        self.view.render_full(&self.rules);
        Ok(vec![
            Action::SelectionChanged(None),
            Action::BoardRendered,
            Action::HistoryChanged,
            self.refresh_status(),
        ])
    }

    /// Take back the most recent move and repaint the squares it touched.
    ///
    /// Any selection is dropped, since the side to move has changed.
    pub fn revert_last(&mut self) -> Option<Vec<Action>> {
        let undone = self.rules.undo()?;
        debug!(from = %undone.from, to = %undone.to, "move reverted");
        self.input = InputState::Idle;
        self.view.clear_highlights();

        let restore = undone.captured.map(|_| undone.to);
        let touched = self
            .view
            .render_incremental(&self.rules, undone.to, undone.from, &undone, restore);
        self.history.sync(self.rules.history());
        Some(vec![
            Action::SelectionChanged(None),
            Action::SquaresChanged(touched),
            Action::HistoryChanged,
            self.refresh_status(),
            Action::MoveReverted(undone),
        ])
    }

    // --- Queries ---

    /// The currently selected square, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Square> {
        self.input.selection()
    }

    /// Number of plies played since the last load.
    #[must_use]
    pub fn ply(&self) -> usize {
        self.rules.history().len()
    }
}
