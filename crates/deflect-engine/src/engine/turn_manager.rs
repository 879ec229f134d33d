use serde::{Deserialize, Serialize};

use crate::{Board, Player};

/// Mirrors each player may place at the start of a match.
pub const INITIAL_RESERVE: u8 = 7;

/// Turn order, reserves and pending reserve credits.
///
/// A destroyed Mirror is not returned to its owner's reserve immediately: it is
/// queued as a pending credit, and a player's pending credits are moved into
/// their reserve when the turn before theirs ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnManager {
    current_player: Player,
    turn_count: u32,
    reserves: [u8; 2],
    pending: [u8; 2],
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_player: Player::One,
            turn_count: 0,
            reserves: [INITIAL_RESERVE; 2],
            pending: [0; 2],
        }
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Number of completed turns.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn reserve(&self, player: Player) -> u8 {
        self.reserves[player.index()]
    }

    #[must_use]
    pub fn pending(&self, player: Player) -> u8 {
        self.pending[player.index()]
    }

    pub(crate) fn decrement_reserve(&mut self, player: Player) {
        let reserve = &mut self.reserves[player.index()];
        *reserve = reserve.saturating_sub(1);
    }

    /// Queues one Mirror to be returned to `owner`'s reserve.
    pub fn register_captured_mirror(&mut self, owner: Player) {
        self.pending[owner.index()] += 1;
        tracing::debug!(%owner, pending = self.pending[owner.index()], "mirror credit queued");
    }

    /// Closes the current player's turn.
    ///
    /// Ticks the swap cooldowns of the current player's DualMirrors, credits
    /// the next player's pending Mirrors, then hands the turn over.
    pub fn end_turn(&mut self, board: &mut Board) {
        let finished = self.current_player;
        let next = finished.opponent();

        board.tick_swap_cooldowns(finished);

        let credit = std::mem::take(&mut self.pending[next.index()]);
        if credit > 0 {
            self.reserves[next.index()] += credit;
            tracing::debug!(player = %next, credit, "pending mirrors credited");
        }

        self.current_player = next;
        self.turn_count += 1;
    }
}
