use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng as _;
use serde::{Deserialize, Serialize};

use super::action_executor;
use crate::{
    Action, ActionError, ActionOutcome, ActionResult, Board, GameLog, LaserEvent, LaserTrace,
    LogLevel, MatchState, Piece, PieceKind, Player, SetupSeed, Snapshot,
};

/// A match is drawn once more than this many turns have been played.
pub const MAX_TURNS: u32 = 100;

/// Final result of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchOutcome {
    Winner(Player),
    Draw,
}

impl MatchOutcome {
    #[must_use]
    pub fn winner(self) -> Option<Player> {
        match self {
            MatchOutcome::Winner(player) => Some(player),
            MatchOutcome::Draw => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Winner(player) => write!(f, "{player} wins"),
            MatchOutcome::Draw => f.write_str("draw"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MatchStatus {
    InProgress,
    Finished(MatchOutcome),
}

impl MatchStatus {
    #[must_use]
    pub fn outcome(self) -> Option<MatchOutcome> {
        match self {
            MatchStatus::InProgress => None,
            MatchStatus::Finished(outcome) => Some(outcome),
        }
    }
}

/// Everything that happened during one accepted turn.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub outcome: ActionOutcome,
    /// `None` when the action suppressed the laser.
    pub laser: Option<LaserTrace>,
    /// Pieces removed by the laser.
    pub destroyed: Vec<Piece>,
    pub status: MatchStatus,
    pub snapshot: Snapshot,
}

/// One-call response to a submitted action, as sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub result: ActionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laser_events: Option<Vec<LaserEvent>>,
    pub snapshot: Snapshot,
}

/// An accepted action and when it was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Number of turns completed before this action.
    pub turn: u32,
    pub action: Action,
    pub played_at: DateTime<Utc>,
}

/// Authoritative state of one match.
///
/// Drives the full turn cycle: validate and apply an action, fire the acting
/// player's laser, remove destroyed pieces, end the turn and check for the end
/// of the match.
///
/// # Example
///
/// ```
/// use deflect_engine::{Action, ActionError, GameEngine, PieceKind, Player};
///
/// let mut engine = GameEngine::new();
/// let emitter = engine
///     .state()
///     .board()
///     .find_piece(PieceKind::Emitter, Player::One)
///     .unwrap()
///     .position();
///
/// let err = engine
///     .execute_action(&Action::rotate(Player::Two, emitter, true))
///     .unwrap_err();
/// assert_eq!(err, ActionError::NotYourTurn { player: Player::Two });
///
/// let report = engine
///     .execute_action(&Action::rotate(Player::One, emitter, true))
///     .unwrap();
/// assert_eq!(report.snapshot.turn_count, 1);
/// assert_eq!(report.snapshot.current_player, Player::Two);
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: MatchState,
    status: MatchStatus,
    last_laser: Option<LaserTrace>,
    log: GameLog,
    history: Vec<HistoryEntry>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Starts a match from a randomly seeded setup.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: SetupSeed) -> Self {
        let mut engine = Self::from_state(MatchState::with_seed(seed));
        engine.log.log(LogLevel::Info, format!("game initialized ({seed})"));
        engine
    }

    /// Starts a match on a prepared board, player 1 to move.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self::from_state(MatchState::new(board))
    }

    #[must_use]
    pub fn from_state(state: MatchState) -> Self {
        Self {
            state,
            status: MatchStatus::InProgress,
            last_laser: None,
            log: GameLog::new(),
            history: vec![],
        }
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    /// The most recent trace, `None` if the last turn fired no laser.
    #[must_use]
    pub fn last_laser(&self) -> Option<&LaserTrace> {
        self.last_laser.as_ref()
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.status.outcome())
    }

    /// Plays one full turn.
    ///
    /// On `Err` nothing but the game log has changed.
    pub fn execute_action(&mut self, action: &Action) -> Result<TurnReport, ActionError> {
        if self.status.is_finished() {
            self.log.log_error(&ActionError::GameOver);
            return Err(ActionError::GameOver);
        }

        let turn = self.state.turns().turn_count();
        let outcome = match action_executor::execute_action(&mut self.state, action) {
            Ok(outcome) => outcome,
            Err(error) => {
                self.log.log_error(&error);
                return Err(error);
            }
        };
        self.log.log_action(action);
        self.history.push(HistoryEntry {
            turn,
            action: *action,
            played_at: Utc::now(),
        });

        let mut destroyed = vec![];
        self.last_laser = None;
        if !outcome.skip_laser {
            let trace = self.state.fire_laser(action.player);
            destroyed = self.state.apply_laser(&trace)?;
            self.log.log_laser(&trace);
            if let Some(royal) = destroyed.iter().find(|p| p.kind() == PieceKind::Royal) {
                self.status = MatchStatus::Finished(MatchOutcome::Winner(royal.owner().opponent()));
            }
            self.last_laser = Some(trace);
        }

        self.state.end_turn();
        self.check_match_end();

        Ok(TurnReport {
            outcome,
            laser: self.last_laser.clone(),
            destroyed,
            status: self.status,
            snapshot: self.snapshot(),
        })
    }

    /// [`Self::execute_action`] in the shape sent back to a client.
    pub fn submit_action(&mut self, action: &Action) -> ActionResponse {
        let result = self.execute_action(action);
        let laser_events = match &result {
            Ok(report) => report.laser.as_ref().map(|trace| trace.events.clone()),
            Err(_) => None,
        };
        let result = result.map(|report| report.outcome);
        ActionResponse {
            result: ActionResult::from(&result),
            laser_events,
            snapshot: self.snapshot(),
        }
    }

    fn check_match_end(&mut self) {
        let outcome = {
            let mut royals = self.state.royals();
            match (royals.next(), royals.next()) {
                (Some(royal), None) => Some(MatchOutcome::Winner(royal.owner())),
                (None, _) => Some(MatchOutcome::Draw),
                (Some(_), Some(_)) => {
                    (self.state.turns().turn_count() > MAX_TURNS).then_some(MatchOutcome::Draw)
                }
            }
        };
        if let Some(outcome) = outcome {
            self.status = MatchStatus::Finished(outcome);
        }
        if let MatchStatus::Finished(outcome) = self.status {
            tracing::info!(%outcome, turns = self.state.turns().turn_count(), "match finished");
            self.log.log_game_over(outcome);
        }
    }
}
