//! Puzzle mode: a set of positions with one expected move each, verified as
//! the user plays.
//!
//! [`PuzzleEngine`] wraps an [`EngineCore`] and inspects every move it
//! applies. A move whose origin+destination text equals the puzzle's solution
//! marks the destination correct; anything else marks it wrong and schedules
//! a reversal. Time never enters this module implicitly: callers pass `now`
//! to [`PuzzleEngine::handle_at`] and drive reversals with
//! [`PuzzleEngine::poll_at`], waiting until [`PuzzleEngine::next_deadline`].

#[cfg(test)]
#[path = "puzzle_test.rs"]
mod puzzle_test;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::consts::{DEFAULT_PUZZLE_RATING, REVERT_DELAY};
use crate::coords::Square;
use crate::engine::{Action, EngineCore};
use crate::input::InputEvent;
use crate::rules::{MoveResult, RulesEngine, RulesError};
use crate::view::Marker;

// =============================================================
// Errors
// =============================================================

#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("puzzle feed contained no usable records")]
    EmptySet,
    #[error("malformed puzzle record: {0}")]
    Malformed(String),
    #[error("puzzle {index} has an invalid position: {source}")]
    InvalidPosition {
        index: usize,
        #[source]
        source: RulesError,
    },
    #[error("puzzle index {index} out of range for a set of {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("no puzzle set loaded")]
    NotLoaded,
}

// =============================================================
// Records
// =============================================================

/// One line of the relay's puzzle feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub fen: String,
    /// Solution in coordinate notation, possibly space-separated.
    pub moves: String,
    #[serde(default = "default_rating")]
    pub rating: i64,
}

fn default_rating() -> i64 {
    DEFAULT_PUZZLE_RATING
}

/// A puzzle ready to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRecord {
    pub fen: String,
    /// Expected move as origin+destination text, e.g. `d1h5`.
    pub solution: String,
    /// Text shown above the board while the puzzle is active.
    pub objective: String,
}

impl TryFrom<WireRecord> for PuzzleRecord {
    type Error = PuzzleError;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        let fen = wire.fen.trim();
        if fen.is_empty() {
            return Err(PuzzleError::Malformed("empty fen".into()));
        }
        let solution: String = wire.moves.split_whitespace().collect();
        if solution.is_empty() {
            return Err(PuzzleError::Malformed("empty moves".into()));
        }
        Ok(Self {
            fen: fen.to_owned(),
            solution,
            objective: format!("Puzzle rating {}", wire.rating),
        })
    }
}

/// Parse one feed line.
///
/// # Errors
///
/// Returns [`PuzzleError::Malformed`] for bad JSON or empty fields.
pub fn parse_record(line: &str) -> Result<PuzzleRecord, PuzzleError> {
    let wire: WireRecord = serde_json::from_str(line).map_err(|e| PuzzleError::Malformed(e.to_string()))?;
    PuzzleRecord::try_from(wire)
}

/// Parse a newline-delimited feed, skipping blank and malformed lines.
///
/// # Errors
///
/// Returns [`PuzzleError::EmptySet`] when no line yields a record.
pub fn parse_feed(text: &str) -> Result<Vec<PuzzleRecord>, PuzzleError> {
    let mut records = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line = n + 1, error = %e, "skipping puzzle record"),
        }
    }
    if records.is_empty() {
        return Err(PuzzleError::EmptySet);
    }
    Ok(records)
}

// =============================================================
// Puzzle set
// =============================================================

/// An ordered, non-empty list of puzzles with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSet {
    records: Vec<PuzzleRecord>,
    index: usize,
}

impl PuzzleSet {
    /// # Errors
    ///
    /// Returns [`PuzzleError::EmptySet`] if `records` is empty.
    pub fn new(records: Vec<PuzzleRecord>) -> Result<Self, PuzzleError> {
        if records.is_empty() {
            return Err(PuzzleError::EmptySet);
        }
        Ok(Self { records, index: 0 })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> &PuzzleRecord {
        &self.records[self.index]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PuzzleRecord> {
        self.records.get(index)
    }

    /// Move the cursor to `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::OutOfRange`] past the end of the set.
    pub fn seek(&mut self, index: usize) -> Result<(), PuzzleError> {
        if index >= self.records.len() {
            return Err(PuzzleError::OutOfRange { index, len: self.records.len() });
        }
        self.index = index;
        Ok(())
    }

    /// Step the cursor forward, wrapping to the first puzzle after the last.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.records.len();
        self.index
    }
}

// =============================================================
// Verification engine
// =============================================================

/// A wrong move waiting to be taken back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReversal {
    pub due: Instant,
    /// Destination square carrying the wrong marker.
    pub square: Square,
    /// Ply count before the wrong move; the reversal unwinds back to it.
    pub ply: usize,
}

/// The board controller plus puzzle verification.
pub struct PuzzleEngine<R: RulesEngine> {
    core: EngineCore<R>,
    set: Option<PuzzleSet>,
    /// Index of the puzzle whose position is on the board. `None` until a
    /// load succeeds, and again after a rejected one.
    loaded: Option<usize>,
    /// Ply count before the correct move, and the square it marked.
    solved: Option<(usize, Square)>,
    pending: VecDeque<PendingReversal>,
    delay: Duration,
}

impl<R: RulesEngine> PuzzleEngine<R> {
    /// An engine with no puzzles yet; the board stays unrendered and input
    /// is ignored until [`PuzzleEngine::install`] is called.
    #[must_use]
    pub fn new(rules: R) -> Self {
        Self {
            core: EngineCore::unrendered(rules),
            set: None,
            loaded: None,
            solved: None,
            pending: VecDeque::new(),
            delay: REVERT_DELAY,
        }
    }

    /// Override the reversal delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore<R> {
        &self.core
    }

    #[must_use]
    pub fn set(&self) -> Option<&PuzzleSet> {
        self.set.as_ref()
    }

    /// True once a puzzle position is on the board and accepting moves.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.loaded.is_some()
    }

    /// The active puzzle, if a set is installed.
    #[must_use]
    pub fn current(&self) -> Option<&PuzzleRecord> {
        self.set.as_ref().map(PuzzleSet::current)
    }

    /// Take ownership of a fetched set and load its first puzzle.
    ///
    /// # Errors
    ///
    /// See [`PuzzleEngine::load_puzzle`].
    pub fn install(&mut self, set: PuzzleSet) -> Result<Vec<Action>, PuzzleError> {
        info!(count = set.len(), "puzzle set installed");
        self.set = Some(set);
        self.load_puzzle(0)
    }

    /// Load puzzle `index`: clear all highlights and markers, drop pending
    /// reversals, and render the puzzle's position.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::NotLoaded`] before a set is installed,
    /// [`PuzzleError::OutOfRange`] for a bad index, and
    /// [`PuzzleError::InvalidPosition`] when the rules engine rejects the
    /// puzzle's position. The cursor still moves to a rejected puzzle so the
    /// user can advance past it, but input is ignored until a load succeeds.
    /// The previous board and its pending reversals are left in place.
    pub fn load_puzzle(&mut self, index: usize) -> Result<Vec<Action>, PuzzleError> {
        let set = self.set.as_mut().ok_or(PuzzleError::NotLoaded)?;
        set.seek(index)?;
        let record = set.current().clone();

        let mut actions = match self.core.load_position(&record.fen) {
            Ok(actions) => actions,
            Err(source) => {
                warn!(index, error = %source, "puzzle position rejected");
                self.loaded = None;
                return Err(PuzzleError::InvalidPosition { index, source });
            }
        };
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "cancelling pending reversals");
            self.pending.clear();
        }
        self.solved = None;
        self.loaded = Some(index);
        info!(index, solution = %record.solution, "puzzle loaded");
        actions.push(Action::PuzzleLoaded { index, objective: record.objective });
        Ok(actions)
    }

    /// Load the next puzzle, wrapping after the last.
    ///
    /// # Errors
    ///
    /// See [`PuzzleEngine::load_puzzle`].
    pub fn advance(&mut self) -> Result<Vec<Action>, PuzzleError> {
        let set = self.set.as_mut().ok_or(PuzzleError::NotLoaded)?;
        let next = set.advance();
        self.load_puzzle(next)
    }

    /// Feed one pointer event and verify any move it produces.
    pub fn handle_at(&mut self, event: InputEvent, now: Instant) -> Vec<Action> {
        let Some(solution) = self
            .loaded
            .and_then(|index| self.set.as_ref()?.get(index))
            .map(|record| record.solution.clone())
        else {
            return Vec::new();
        };
        let mut actions = self.core.handle(event);
        let played: Vec<MoveResult> = actions
            .iter()
            .filter_map(|a| match a {
                Action::MoveApplied(result) => Some(result.clone()),
                _ => None,
            })
            .collect();
        for result in played {
            actions.push(self.verify(&result, &solution, now));
        }
        actions
    }

    fn verify(&mut self, result: &MoveResult, solution: &str, now: Instant) -> Action {
        let played = result.coordinate_text();
        if played == solution {
            info!(%played, "puzzle solved");
            self.core.view.set_marker(result.to, Marker::Correct);
            self.solved = Some((self.core.ply().saturating_sub(1), result.to));
            Action::PuzzleSolved { square: result.to }
        } else {
            let due = now + self.delay;
            debug!(%played, expected = %solution, "wrong puzzle move, reverting");
            self.core.view.set_marker(result.to, Marker::Wrong);
            self.pending.push_back(PendingReversal {
                due,
                square: result.to,
                ply: self.core.ply().saturating_sub(1),
            });
            Action::PuzzleMissed { square: result.to }
        }
    }

    /// When the earliest pending reversal falls due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.due)
    }

    /// Reversals still waiting to run.
    #[must_use]
    pub fn pending(&self) -> &VecDeque<PendingReversal> {
        &self.pending
    }

    /// Run every reversal due at `now`.
    ///
    /// Each one unwinds the position to the ply count recorded before its
    /// wrong move. Later reversals whose moves that unwind already took back
    /// are dropped along with their markers, and so is the correct marker of
    /// a solving move the unwind took back.
    pub fn poll_at(&mut self, now: Instant) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Some(reversal) = self.pending.front().copied() {
            if reversal.due > now {
                break;
            }
            self.pending.pop_front();
            self.core.view.clear_marker(reversal.square, Marker::Wrong);

            while self.core.ply() > reversal.ply {
                let Some(reverted) = self.core.revert_last() else {
                    break;
                };
                actions.extend(reverted);
            }
            if let Some((ply, square)) = self.solved
                && ply >= reversal.ply
            {
                self.core.view.clear_marker(square, Marker::Correct);
                self.solved = None;
            }

            let (covered, kept): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|p| p.ply >= reversal.ply);
            for dropped in covered {
                self.core.view.clear_marker(dropped.square, Marker::Wrong);
            }
            self.pending = kept.into();
        }
        actions
    }
}
