//! Match rules and turn orchestration.
//!
//! This module builds the rules of a match on top of the core board types:
//!
//! - [`GameEngine`] - authoritative match: validates actions, fires lasers, decides the winner
//! - [`MatchState`] - board plus turn state, cheap to clone for look-ahead
//! - [`Action`] - the four player actions and their wire format
//! - [`TurnManager`] - alternation, turn counting and mirror reserves
//! - [`laser_simulator`] - beam tracing producing a [`LaserTrace`]
//! - [`Snapshot`] - serializable read-only view of a match
//! - [`GameLog`] - bounded, human-readable match history
//! - [`SetupSeed`] - seed for the deterministic opening layout
//!
//! # Turn Flow
//!
//! 1. The player to move submits an [`Action`]
//! 2. The action is validated and applied, or rejected with an [`ActionError`](crate::ActionError)
//! 3. Unless the action suppresses it, the acting player's laser fires
//! 4. Destroyed pieces are removed and Mirror credits are queued
//! 5. The turn ends and the match end conditions are checked
//!
//! # Example
//!
//! ```
//! use deflect_engine::{GameEngine, SetupSeed};
//!
//! let mut engine = GameEngine::with_seed(SetupSeed::from_bytes([7; 16]));
//!
//! while engine.status().is_in_progress() {
//!     let player = engine.current_player();
//!     let action = engine
//!         .state()
//!         .board()
//!         .pieces_of(player)
//!         .find_map(|piece| {
//!             engine
//!                 .state()
//!                 .valid_actions_for(piece.position())
//!                 .into_iter()
//!                 .next()
//!         })
//!         .unwrap();
//!     engine.execute_action(&action).unwrap();
//! }
//!
//! println!("{}", engine.snapshot().turn_count);
//! ```

pub use self::{
    action::*,
    action_executor::execute_action,
    board_setup::*,
    game_engine::*,
    game_log::*,
    laser_simulator::{LASER_ITERATION_LIMIT, LaserEvent, LaserEventKind, LaserTrace},
    snapshot::*,
    state::*,
    turn_manager::*,
};

mod action;
mod action_executor;
mod board_setup;
mod game_engine;
mod game_log;
pub mod laser_simulator;
mod snapshot;
mod state;
mod turn_manager;
