//! Enumeration of every legal action for the player to move.

use deflect_engine::{Action, Direction, MatchState};

/// All legal actions for the current player, in a stable order.
///
/// Piece actions come first (per piece: rotations, moves, swaps), followed by
/// every legal Mirror placement in each of the four facings.
#[must_use]
pub fn available_actions(state: &MatchState) -> Vec<Action> {
    let player = state.current_player();
    let mut actions = state
        .board()
        .pieces_of(player)
        .flat_map(|piece| state.valid_actions_for(piece.position()))
        .collect::<Vec<_>>();
    for at in state.valid_placements(player) {
        actions.extend(
            Direction::ALL
                .into_iter()
                .map(|facing| Action::place(player, at, facing)),
        );
    }
    actions
}
