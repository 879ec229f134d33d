//! Turn evaluation: choosing the action to play this turn.
//!
//! # How It Works
//!
//! 1. **Enumerate Actions** - every legal action for the player to move
//!    ([`available_actions`])
//! 2. **Shuffle** - candidates are visited in random order so that ties do not
//!    always resolve the same way
//! 3. **Score Each Action** - play it on a copy of the match
//!    ([`ActionAnalysis`]) and score it with an [`ActionEvaluator`]
//! 4. **Select Best** - keep the highest score seen before the deadline
//!
//! # Time Budget
//!
//! The deadline is checked between candidates, so a single slow candidate may
//! overrun it. If no candidate was scored in time, the first enumerated action
//! is played.
//!
//! # Usage
//!
//! ```
//! use deflect_ai::{action_evaluator::MaterialActionEvaluator, turn_evaluator::TurnEvaluator};
//! use deflect_engine::{GameEngine, SetupSeed};
//!
//! let evaluator = TurnEvaluator::new(Box::new(MaterialActionEvaluator::default()));
//! let mut engine = GameEngine::with_seed(SetupSeed::from_bytes([1; 16]));
//!
//! let action = evaluator
//!     .select_best_action(engine.state(), &mut rand::rng())
//!     .unwrap();
//! engine.execute_action(&action).unwrap();
//! ```

use std::time::{Duration, Instant};

use deflect_engine::{Action, ActionError, GameEngine, MatchState, MatchStatus};
use rand::{Rng, seq::SliceRandom as _};

use crate::{
    action_analysis::ActionAnalysis, action_evaluator::ActionEvaluator,
    action_generator::available_actions,
};

/// Default wall-clock budget for one decision.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(230);

#[derive(Debug)]
pub struct TurnEvaluator<'a> {
    action_evaluator: Box<dyn ActionEvaluator + 'a>,
    time_budget: Duration,
}

impl<'a> TurnEvaluator<'a> {
    #[must_use]
    pub fn new(action_evaluator: Box<dyn ActionEvaluator + 'a>) -> Self {
        Self {
            action_evaluator,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }

    #[must_use]
    pub fn with_time_budget(self, time_budget: Duration) -> Self {
        Self {
            time_budget,
            ..self
        }
    }

    #[must_use]
    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    /// Picks the action to play for the player to move in `state`.
    ///
    /// Returns `None` only if that player has no legal action at all.
    pub fn select_best_action<R>(&self, state: &MatchState, rng: &mut R) -> Option<Action>
    where
        R: Rng + ?Sized,
    {
        let deadline = Instant::now() + self.time_budget;
        let mut candidates = available_actions(state);
        let fallback = *candidates.first()?;
        candidates.shuffle(rng);

        let mut best: Option<(Action, f32)> = None;
        let mut scored = 0;
        for action in &candidates {
            if Instant::now() >= deadline {
                break;
            }
            let analysis = match ActionAnalysis::from_state(state, *action) {
                Ok(analysis) => analysis,
                Err(error) => {
                    tracing::warn!(%action, %error, "generated action was rejected");
                    continue;
                }
            };
            let score = self.action_evaluator.evaluate_action(&analysis);
            scored += 1;
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((*action, score));
            }
        }

        tracing::debug!(
            player = %state.current_player(),
            candidates = candidates.len(),
            scored,
            best_score = best.map(|(_, score)| score),
            "action selected"
        );
        Some(best.map_or(fallback, |(action, _)| action))
    }

    /// Lets this evaluator play both sides of `engine` for at most
    /// `turn_limit` turns.
    pub fn play_match<R>(
        &self,
        engine: &mut GameEngine,
        turn_limit: usize,
        rng: &mut R,
    ) -> Result<MatchStatus, ActionError>
    where
        R: Rng + ?Sized,
    {
        for _ in 0..turn_limit {
            if engine.status().is_finished() {
                break;
            }
            let Some(action) = self.select_best_action(engine.state(), rng) else {
                break;
            };
            engine.execute_action(&action)?;
        }
        Ok(engine.status())
    }
}

#[cfg(test)]
mod tests {
    use deflect_engine::{
        Board, Cell, Direction, MAX_TURNS, PieceKind, Player, Position, SetupSeed,
    };
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::action_evaluator::MaterialActionEvaluator;

    fn evaluator() -> TurnEvaluator<'static> {
        TurnEvaluator::new(Box::new(MaterialActionEvaluator::default()))
            .with_time_budget(Duration::from_secs(30))
    }

    #[test]
    fn test_selects_winning_action() {
        let mut board = Board::new();
        for (kind, owner, (x, y), facing) in [
            (PieceKind::Emitter, Player::One, (5, 4), Direction::East),
            (PieceKind::Royal, Player::One, (5, 7), Direction::South),
            (PieceKind::Emitter, Player::Two, (0, 9), Direction::East),
            (PieceKind::Royal, Player::Two, (5, 1), Direction::North),
        ] {
            board
                .add_piece(kind, owner, Position::new(x, y), facing)
                .unwrap();
        }
        let state = MatchState::new(board);
        let mut rng = Pcg32::seed_from_u64(7);
        let action = evaluator().select_best_action(&state, &mut rng).unwrap();
        assert_eq!(action, Action::rotate(Player::One, Cell::new(5, 4), false));
    }

    #[test]
    fn test_zero_budget_falls_back_to_first_action() {
        let state = MatchState::with_seed(SetupSeed::from_bytes([9; 16]));
        let evaluator = evaluator().with_time_budget(Duration::ZERO);
        let mut rng = Pcg32::seed_from_u64(1);
        let action = evaluator.select_best_action(&state, &mut rng).unwrap();
        assert_eq!(action, available_actions(&state)[0]);
    }

    #[test]
    fn test_play_match_finishes() {
        let seed = SetupSeed::from_bytes([5; 16]);
        let play = || {
            let mut engine = GameEngine::with_seed(seed);
            let mut rng = Pcg32::seed_from_u64(11);
            let status = evaluator()
                .play_match(&mut engine, 2 * MAX_TURNS as usize, &mut rng)
                .unwrap();
            (status, engine)
        };

        let (status, engine) = play();
        assert!(status.is_finished());
        assert!(engine.snapshot().game_over);
        assert!(engine.snapshot().turn_count <= MAX_TURNS + 1);

        let (replayed_status, replayed) = play();
        assert_eq!(replayed_status, status);
        assert!(
            engine
                .history()
                .iter()
                .map(|h| h.action)
                .eq(replayed.history().iter().map(|h| h.action))
        );
    }
}
