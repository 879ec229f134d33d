//! Outcome of a candidate action, played out on a copy of the match.
//!
//! [`ActionAnalysis`] applies an action to a clone of the [`MatchState`], fires
//! the acting player's laser (unless the action suppresses it), removes what it
//! destroyed and then traces one shot of the opponent's laser on the resulting
//! board. The original state is never touched.
//!
//! ```rust,ignore
//! let analysis = ActionAnalysis::from_state(&state, action)?;
//! let lost = analysis.destroyed_of(state.current_player()).count();
//! let exposed = analysis.royal_exposed();
//! ```

use deflect_engine::{Action, ActionError, MatchState, Piece, PieceKind, Player, execute_action};

#[derive(Debug, Clone)]
pub struct ActionAnalysis {
    action: Action,
    laser_fired: bool,
    destroyed: Vec<Piece>,
    royal_exposed: bool,
}

impl ActionAnalysis {
    /// Plays `action` on a copy of `state`.
    ///
    /// Fails if the action is illegal in `state`.
    pub fn from_state(state: &MatchState, action: Action) -> Result<Self, ActionError> {
        let mut after = state.clone();
        let outcome = execute_action(&mut after, &action)?;

        let destroyed = if outcome.skip_laser {
            vec![]
        } else {
            let trace = after.fire_laser(action.player);
            after.apply_laser(&trace)?
        };
        let royal_exposed = after
            .fire_laser(action.player.opponent())
            .destroys_royal_of(action.player);

        Ok(Self {
            action,
            laser_fired: !outcome.skip_laser,
            destroyed,
            royal_exposed,
        })
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn player(&self) -> Player {
        self.action.player
    }

    #[must_use]
    pub fn laser_fired(&self) -> bool {
        self.laser_fired
    }

    /// Pieces removed by the acting player's laser.
    #[must_use]
    pub fn destroyed(&self) -> &[Piece] {
        &self.destroyed
    }

    pub fn destroyed_of(&self, owner: Player) -> impl Iterator<Item = &Piece> + '_ {
        self.destroyed.iter().filter(move |p| p.owner() == owner)
    }

    #[must_use]
    pub fn destroys_royal_of(&self, owner: Player) -> bool {
        self.destroyed_of(owner).any(|p| p.kind() == PieceKind::Royal)
    }

    /// Whether the opponent's next shot, fired without any move, would hit the
    /// acting player's Royal.
    #[must_use]
    pub fn royal_exposed(&self) -> bool {
        self.royal_exposed
    }
}
