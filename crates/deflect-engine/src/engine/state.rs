use arrayvec::ArrayVec;

use super::laser_simulator;
use crate::{
    Action, BOARD_SIZE, Board, BoardError, LaserTrace, Piece, PieceKind, Player, Position,
    SetupSeed, SwapTarget, TurnManager, initial_board,
};

/// Everything that changes during a match: the board and the turn state.
///
/// `MatchState` owns all of its data, so cloning it yields a fully
/// independent copy that can be played forward without touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    board: Board,
    turns: TurnManager,
}

impl MatchState {
    /// A match on `board` with player 1 to move and full reserves.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            turns: TurnManager::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: SetupSeed) -> Self {
        Self::new(initial_board(seed))
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    pub(crate) fn turns_mut(&mut self) -> &mut TurnManager {
        &mut self.turns
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.turns.current_player()
    }

    /// Whether a Mirror may be placed on `position` regardless of reserves:
    /// the cell is empty and not orthogonally adjacent to any Emitter or Royal.
    #[must_use]
    pub fn is_placement_allowed(&self, position: Position) -> bool {
        self.board.is_empty_at(position) && !self.is_protected_perimeter(position)
    }

    pub(crate) fn is_protected_perimeter(&self, position: Position) -> bool {
        self.board
            .adjacent_pieces(position)
            .iter()
            .any(|p| matches!(p.kind(), PieceKind::Emitter | PieceKind::Royal))
    }

    /// Empty orthogonal neighbours the piece at `position` may step to.
    #[must_use]
    pub fn valid_moves_for(&self, position: Position) -> ArrayVec<Position, 4> {
        let Some(piece) = self.board.piece_at(position).filter(|p| p.can_move()) else {
            return ArrayVec::new();
        };
        piece
            .position()
            .neighbors()
            .into_iter()
            .filter(|&to| self.board.is_empty_at(to))
            .collect()
    }

    /// Positions of the Emitter and Royal the DualMirror at `position` may swap
    /// with right now.
    #[must_use]
    pub fn valid_swap_targets(&self, position: Position) -> ArrayVec<Position, 2> {
        let Some(piece) = self.board.piece_at(position) else {
            return ArrayVec::new();
        };
        let Some(cooldowns) = piece.cooldowns() else {
            return ArrayVec::new();
        };
        self.board
            .pieces_of(piece.owner())
            .filter(|target| {
                SwapTarget::from_kind(target.kind()).is_some_and(|t| cooldowns.is_ready(t))
            })
            .map(Piece::position)
            .take(2)
            .collect()
    }

    /// Cells where `player` could place a Mirror this turn.
    #[must_use]
    pub fn valid_placements(&self, player: Player) -> Vec<Position> {
        if self.turns.reserve(player) == 0 {
            return vec![];
        }
        all_positions()
            .filter(|&position| self.is_placement_allowed(position))
            .collect()
    }

    /// Rotations, moves and swaps available to the piece at `position`.
    ///
    /// Empty unless the piece belongs to the player to move.
    #[must_use]
    pub fn valid_actions_for(&self, position: Position) -> Vec<Action> {
        let player = self.current_player();
        let Some(piece) = self.board.piece_at(position).filter(|p| p.owner() == player) else {
            return vec![];
        };
        let mut actions = vec![];
        if piece.can_rotate() {
            actions.push(Action::rotate(player, position, true));
            actions.push(Action::rotate(player, position, false));
        }
        actions.extend(
            self.valid_moves_for(position)
                .into_iter()
                .map(|to| Action::move_piece(player, position, to)),
        );
        actions.extend(
            self.valid_swap_targets(position)
                .into_iter()
                .map(|to| Action::swap(player, position, to)),
        );
        actions
    }

    /// Closes the current player's turn, see [`TurnManager::end_turn`].
    pub(crate) fn end_turn(&mut self) {
        self.turns.end_turn(&mut self.board);
    }

    /// Traces `player`'s laser on the current board.
    #[must_use]
    pub fn fire_laser(&self, player: Player) -> LaserTrace {
        laser_simulator::simulate(&self.board, player)
    }

    /// Removes every piece destroyed by `trace` and queues reserve credits for
    /// destroyed Mirrors. Returns the removed pieces.
    pub fn apply_laser(&mut self, trace: &LaserTrace) -> Result<Vec<Piece>, BoardError> {
        let destroyed = trace.destroyed_pieces();
        for piece in &destroyed {
            self.board.remove_piece(piece.id())?;
            if piece.kind() == PieceKind::Mirror {
                self.turns.register_captured_mirror(piece.owner());
            }
        }
        Ok(destroyed)
    }

    /// Live Royals on the board.
    pub fn royals(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.board.pieces_of_kind(PieceKind::Royal)
    }
}

#[expect(clippy::cast_possible_truncation)]
fn all_positions() -> impl Iterator<Item = Position> {
    (0..BOARD_SIZE as u8).flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Position::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionKind, Direction, SWAP_COOLDOWN};

    fn sample_state() -> MatchState {
        let mut board = Board::new();
        let pieces = [
            (PieceKind::Emitter, Player::One, (0, 0), Direction::South),
            (PieceKind::Royal, Player::One, (4, 1), Direction::South),
            (PieceKind::DualMirror, Player::One, (6, 3), Direction::East),
            (PieceKind::Shield, Player::One, (2, 5), Direction::South),
            (PieceKind::Emitter, Player::Two, (9, 9), Direction::North),
            (PieceKind::Royal, Player::Two, (5, 8), Direction::North),
        ];
        for (kind, owner, (x, y), facing) in pieces {
            board
                .add_piece(kind, owner, Position::new(x, y), facing)
                .unwrap();
        }
        MatchState::new(board)
    }

    #[test]
    fn test_valid_moves() {
        let mut state = sample_state();
        assert_eq!(state.valid_moves_for(Position::new(2, 5)).len(), 4);
        assert!(state.valid_moves_for(Position::new(4, 1)).is_empty());
        assert!(state.valid_moves_for(Position::new(0, 0)).is_empty());
        assert!(state.valid_moves_for(Position::new(7, 7)).is_empty());

        state
            .board_mut()
            .add_piece(
                PieceKind::Mirror,
                Player::Two,
                Position::new(2, 6),
                Direction::East,
            )
            .unwrap();
        let moves = state.valid_moves_for(Position::new(2, 5));
        assert_eq!(moves.len(), 3);
        assert!(!moves.contains(&Position::new(2, 6)));
    }

    #[test]
    fn test_valid_swap_targets_respect_cooldowns() {
        let mut state = sample_state();
        let dual = Position::new(6, 3);
        let targets = state.valid_swap_targets(dual);
        assert_eq!(
            targets.as_slice(),
            [Position::new(0, 0), Position::new(4, 1)]
        );

        let id = state.board().piece_at(dual).unwrap().id();
        state
            .board_mut()
            .piece_mut(id)
            .unwrap()
            .cooldowns_mut()
            .unwrap()
            .set(SwapTarget::Royal, SWAP_COOLDOWN);
        assert_eq!(
            state.valid_swap_targets(dual).as_slice(),
            [Position::new(0, 0)]
        );
        assert!(state.valid_swap_targets(Position::new(2, 5)).is_empty());
    }

    #[test]
    fn test_valid_placements_exclude_perimeter() {
        let state = sample_state();
        let placements = state.valid_placements(Player::One);
        for protected in [
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(4, 0),
            Position::new(3, 1),
            Position::new(5, 1),
            Position::new(4, 2),
            Position::new(9, 8),
            Position::new(5, 7),
        ] {
            assert!(!placements.contains(&protected), "{protected}");
        }
        assert!(!placements.contains(&Position::new(2, 5)));
        assert!(placements.contains(&Position::new(1, 1)));
        // 100 cells, 6 occupied, 12 protected
        assert_eq!(placements.len(), 100 - 6 - 12);
    }

    #[test]
    fn test_valid_placements_need_reserve() {
        let mut state = sample_state();
        for _ in 0..crate::INITIAL_RESERVE {
            state.turns_mut().decrement_reserve(Player::Two);
        }
        assert!(state.valid_placements(Player::Two).is_empty());
        assert!(!state.valid_placements(Player::One).is_empty());
    }

    #[test]
    fn test_valid_actions_for_piece() {
        let state = sample_state();
        let actions = state.valid_actions_for(Position::new(6, 3));
        let rotations = actions
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::Rotate { .. }))
            .count();
        let moves = actions
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::Move { .. }))
            .count();
        let swaps = actions
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::Swap { .. }))
            .count();
        assert_eq!((rotations, moves, swaps), (2, 4, 2));

        assert!(state.valid_actions_for(Position::new(4, 1)).is_empty());
        // opponent's piece
        assert!(state.valid_actions_for(Position::new(9, 9)).is_empty());
    }

    #[test]
    fn test_apply_laser_removes_and_credits() {
        let mut state = sample_state();
        state
            .board_mut()
            .add_piece(
                PieceKind::Mirror,
                Player::Two,
                Position::new(0, 4),
                Direction::West,
            )
            .unwrap();
        // emitter (0,0) fires South into the back of the mirror at (0,4)
        let trace = state.fire_laser(Player::One);
        let destroyed = state.apply_laser(&trace).unwrap();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].kind(), PieceKind::Mirror);
        assert!(state.board().piece_at(Position::new(0, 4)).is_none());
        assert_eq!(state.turns().pending(Player::Two), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let state = sample_state();
        let mut copy = state.clone();
        let id = copy.board().piece_at(Position::new(2, 5)).unwrap().id();
        copy.board_mut().move_piece(id, 2, 6).unwrap();
        copy.turns_mut().end_turn(&mut Board::new());
        assert!(state.board().piece_at(Position::new(2, 5)).is_some());
        assert_eq!(state.current_player(), Player::One);
        assert_ne!(state, copy);
    }
}
