//! Board interaction controller and puzzle verification engine.
//!
//! The crate owns everything between raw pointer events and a painted
//! chessboard: the selection state machine, submitting moves to a rules
//! engine, syncing the board projection after each move, and the derived
//! move-history, capture, and status projections. Puzzle mode layers
//! solution checking and timed reversal of wrong moves on top. Hosts (a
//! terminal, a browser binding) feed [`input::InputEvent`]s in and paint
//! from [`view::BoardView`] after processing the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`coords`] | Square names and the row/column grid mapping |
//! | [`rules`] | The [`rules::RulesEngine`] seam and its move types |
//! | [`standard`] | Standard chess rules backed by `shakmaty` |
//! | [`view`] | Per-square board projection and full/incremental rendering |
//! | [`input`] | Pointer events and the selection state machine |
//! | [`game`] | History table, capture trays, and status banner |
//! | [`engine`] | The controller, [`engine::EngineCore`] |
//! | [`puzzle`] | Puzzle records, sets, and the verification engine |
//! | [`consts`] | Shared constants (history size, revert delay, icon paths) |

pub mod consts;
pub mod coords;
pub mod engine;
pub mod game;
pub mod input;
pub mod puzzle;
pub mod rules;
pub mod standard;
pub mod view;
