//! Greedy AI player for deflect matches.
//!
//! The AI is built in three levels:
//!
//! ```text
//! Turn Evaluation (pick the action to play, within a time budget)
//!     ↓ uses
//! Action Evaluation (score one candidate action)
//!     ↓ uses
//! Action Analysis (play the candidate on a copy of the match)
//! ```
//!
//! - [`action_generator`] - enumerates every legal action for the player to move
//! - [`action_analysis`] - applies a candidate, fires both lasers on a scratch copy
//! - [`action_evaluator`] - material and Royal-safety scoring with tunable [`MaterialWeights`](action_evaluator::MaterialWeights)
//! - [`turn_evaluator`] - deadline-bounded best-action search and self-play
//!
//! # Limitations
//!
//! - **One ply**: the opponent's reply is modelled as a single shot without any move
//! - **No positional terms**: quiet actions all score the same and are picked at random

pub mod action_analysis;
pub mod action_evaluator;
pub mod action_generator;
pub mod turn_evaluator;
