//! Input model: pointer events and the selection state machine.
//!
//! Click-to-move and drag-and-drop both feed [`transition`], a pure function
//! of `(state, event, position)` that returns the next state plus the list of
//! effects the controller must carry out. Nothing here mutates the position;
//! a move attempt is handed back as [`Effect::Attempt`] and the controller
//! reports the engine's verdict through [`settle`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::coords::Square;
use crate::rules::{MoveAttempt, RulesEngine};

/// Which input surface produced a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Drag,
}

/// A raw pointer event, already mapped to a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user clicked a square.
    Click(Square),
    /// The user started dragging the piece on a square.
    DragStart(Square),
    /// A dragged piece is over a square.
    DragOver(Square),
    /// A dragged piece left a square.
    DragLeave(Square),
    /// A dragged piece was released. `from` is the square the drag started on.
    Drop { from: Square, to: Square },
}

/// The selection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A piece of the side to move is selected.
    Selected {
        /// Square of the selected piece.
        origin: Square,
    },
}

impl InputState {
    #[must_use]
    pub fn selection(self) -> Option<Square> {
        match self {
            Self::Idle => None,
            Self::Selected { origin } => Some(origin),
        }
    }
}

/// Work the controller performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Highlight `origin` as selected and exactly `targets` as its legal destinations.
    Select { origin: Square, targets: Vec<Square> },
    /// Clear the selection and every highlight.
    Deselect,
    /// Submit a move to the rules engine.
    Attempt { attempt: MoveAttempt, gesture: Gesture },
    /// Refuse a drag: the piece does not belong to the side to move.
    DragRefused(Square),
    /// Move the drop-target hover.
    Hover(Option<Square>),
}

/// Advance the state machine by one event.
pub fn transition<R: RulesEngine + ?Sized>(
    state: InputState,
    event: InputEvent,
    rules: &R,
) -> (InputState, Vec<Effect>) {
    match event {
        InputEvent::Click(square) => on_click(state, square, rules),
        InputEvent::DragStart(square) => {
            if movable(rules, square) {
                select(square, rules)
            } else {
                (state, vec![Effect::DragRefused(square)])
            }
        }
        InputEvent::DragOver(square) => (state, vec![Effect::Hover(Some(square))]),
        InputEvent::DragLeave(_) => (state, vec![Effect::Hover(None)]),
        InputEvent::Drop { from, to } => on_drop(state, from, to, rules),
    }
}

/// Resolve a submitted attempt.
///
/// A successful move always returns to `Idle`. A rejected click also returns
/// to `Idle`; a rejected drop leaves `state` as it was.
#[must_use]
pub fn settle(state: InputState, gesture: Gesture, accepted: bool) -> (InputState, Vec<Effect>) {
    match (accepted, gesture) {
        (false, Gesture::Drag) => (state, Vec::new()),
        _ => (InputState::Idle, vec![Effect::Deselect]),
    }
}

fn on_click<R: RulesEngine + ?Sized>(state: InputState, square: Square, rules: &R) -> (InputState, Vec<Effect>) {
    match state {
        InputState::Idle => {
            if movable(rules, square) {
                select(square, rules)
            } else {
                (state, Vec::new())
            }
        }
        InputState::Selected { origin } if origin == square => (InputState::Idle, vec![Effect::Deselect]),
        InputState::Selected { .. } if movable(rules, square) => select(square, rules),
        InputState::Selected { origin } => match MoveAttempt::new(origin, square) {
            Some(attempt) => (state, vec![Effect::Attempt { attempt, gesture: Gesture::Click }]),
            None => (InputState::Idle, vec![Effect::Deselect]),
        },
    }
}

fn on_drop<R: RulesEngine + ?Sized>(
    state: InputState,
    from: Square,
    to: Square,
    rules: &R,
) -> (InputState, Vec<Effect>) {
    let mut effects = vec![Effect::Hover(None)];
    if !movable(rules, from) {
        return (state, effects);
    }
    match MoveAttempt::new(from, to) {
        Some(attempt) => {
            effects.push(Effect::Attempt { attempt, gesture: Gesture::Drag });
            (state, effects)
        }
        None => {
            effects.push(Effect::Deselect);
            (InputState::Idle, effects)
        }
    }
}

fn select<R: RulesEngine + ?Sized>(origin: Square, rules: &R) -> (InputState, Vec<Effect>) {
    let targets = rules.legal_moves_from(origin).into_iter().map(|m| m.to).collect();
    (InputState::Selected { origin }, vec![Effect::Select { origin, targets }])
}

/// Whether the piece on `square` belongs to the side to move.
fn movable<R: RulesEngine + ?Sized>(rules: &R, square: Square) -> bool {
    rules.piece_at(square).is_some_and(|p| p.color == rules.turn())
}
