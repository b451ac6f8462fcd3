//! One interactive board session: free play or a puzzle run.
//!
//! The session turns prompt commands into board input events, tracks the
//! drag in progress (the terminal has no pointer to carry it), and produces
//! the text to print after each command. It never sleeps or reads the clock;
//! the caller passes `now` and waits for [`Session::next_deadline`].

use std::time::Instant;

use board::coords::Square;
use board::engine::{Action, EngineCore};
use board::input::InputEvent;
use board::puzzle::{PuzzleEngine, PuzzleSet};
use board::standard::StandardRules;
use tracing::warn;

use crate::command::{Command, HELP};
use crate::fetch::FetchError;
use crate::render::frame;

pub enum Game {
    Free(EngineCore<StandardRules>),
    Puzzle(PuzzleEngine<StandardRules>),
}

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

pub struct Session {
    game: Game,
    dragging: Option<Square>,
}

impl Session {
    /// Free play from the standard starting position.
    #[must_use]
    pub fn free_play() -> Self {
        Self { game: Game::Free(EngineCore::new(StandardRules::new())), dragging: None }
    }

    /// Puzzle mode, waiting for a set to be installed.
    #[must_use]
    pub fn puzzles() -> Self {
        Self { game: Game::Puzzle(PuzzleEngine::new(StandardRules::new())), dragging: None }
    }

    /// Accept the outcome of the puzzle-set download.
    ///
    /// A failed download leaves puzzle mode non-interactive.
    pub fn install(&mut self, fetched: Result<PuzzleSet, FetchError>) -> String {
        let Game::Puzzle(engine) = &mut self.game else {
            return String::new();
        };
        let set = match fetched {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "puzzle download failed");
                return format!("Could not load puzzles: {e}");
            }
        };
        match engine.install(set) {
            Ok(_) => self.render(),
            Err(e) => format!("Puzzle could not be shown: {e} (try `next`)"),
        }
    }

    /// When a pending puzzle reversal falls due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.game {
            Game::Free(_) => None,
            Game::Puzzle(engine) => engine.next_deadline(),
        }
    }

    /// Run due reversals; returns the redrawn board if anything changed.
    pub fn poll_at(&mut self, now: Instant) -> Option<String> {
        let Game::Puzzle(engine) = &mut self.game else {
            return None;
        };
        if engine.poll_at(now).is_empty() {
            return None;
        }
        Some(self.render())
    }

    pub fn execute_at(&mut self, command: Command, now: Instant) -> Reply {
        let text = match command {
            Command::Click(square) => {
                self.dragging = None;
                self.feed(InputEvent::Click(square), now)
            }
            Command::Drag(square) => self.start_drag(square, now),
            Command::Over(square) => self.feed(InputEvent::DragOver(square), now),
            Command::Leave(square) => self.feed(InputEvent::DragLeave(square), now),
            Command::Drop(to) => match self.dragging.take() {
                Some(from) => self.feed(InputEvent::Drop { from, to }, now),
                None => "Nothing is being dragged (use `drag <sq>` first).".to_owned(),
            },
            Command::Move(from, to) => {
                self.dragging = None;
                if let Some(refusal) = self.refusal() {
                    return Reply::Print(refusal);
                }
                self.dispatch(InputEvent::Click(from), now);
                self.feed(InputEvent::Click(to), now)
            }
            Command::Next => self.next_puzzle(),
            Command::Board => self.render(),
            Command::Help => HELP.to_owned(),
            Command::Quit => return Reply::Quit,
        };
        Reply::Print(text)
    }

    fn start_drag(&mut self, square: Square, now: Instant) -> String {
        self.dragging = None;
        if let Some(refusal) = self.refusal() {
            return refusal;
        }
        let actions = self.dispatch(InputEvent::DragStart(square), now);
        if actions.contains(&Action::DragRefused(square)) {
            return format!("The piece on {square} cannot be dragged.");
        }
        self.dragging = Some(square);
        self.render_with(&actions)
    }

    fn next_puzzle(&mut self) -> String {
        let Game::Puzzle(engine) = &mut self.game else {
            return "`next` only works in puzzle mode.".to_owned();
        };
        self.dragging = None;
        match engine.advance() {
            Ok(_) => self.render(),
            Err(e) => format!("Puzzle could not be shown: {e} (try `next`)"),
        }
    }

    fn dispatch(&mut self, event: InputEvent, now: Instant) -> Vec<Action> {
        match &mut self.game {
            Game::Free(core) => core.handle(event),
            Game::Puzzle(engine) => engine.handle_at(event, now),
        }
    }

    fn feed(&mut self, event: InputEvent, now: Instant) -> String {
        if let Some(refusal) = self.refusal() {
            return refusal;
        }
        let actions = self.dispatch(event, now);
        self.render_with(&actions)
    }

    /// Why board input is ignored right now, if it is.
    fn refusal(&self) -> Option<String> {
        match &self.game {
            Game::Puzzle(engine) if !engine.is_ready() => Some(if engine.set().is_some() {
                "This puzzle could not be shown (try `next`).".to_owned()
            } else {
                "Puzzles are not loaded.".to_owned()
            }),
            _ => None,
        }
    }

    fn render_with(&self, actions: &[Action]) -> String {
        let notes: Vec<&str> = actions
            .iter()
            .filter_map(|action| match action {
                Action::PuzzleSolved { .. } => Some("Correct!"),
                Action::PuzzleMissed { .. } => Some("Wrong move."),
                _ => None,
            })
            .collect();
        let board = self.render();
        if notes.is_empty() { board } else { format!("{}\n\n{board}", notes.join(" ")) }
    }

    /// The full frame for the current game.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.game {
            Game::Free(core) => frame(core, None),
            Game::Puzzle(engine) => match (engine.set(), engine.current()) {
                (Some(set), Some(record)) => {
                    let heading = format!("Puzzle {}/{} | {}", set.index() + 1, set.len(), record.objective);
                    frame(engine.core(), Some(&heading))
                }
                _ => "Puzzles are not loaded.".to_owned(),
            },
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
