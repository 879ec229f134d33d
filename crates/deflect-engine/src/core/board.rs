use std::fmt;

use crate::BoardError;

use super::{AdjacentPieces, BOARD_SIZE, Direction, Piece, PieceId, PieceKind, Player, Position};

/// The playing field: a `BOARD_SIZE` × `BOARD_SIZE` grid holding at most one
/// piece per cell.
///
/// Pieces are stored in an arena indexed by [`PieceId`]; removed pieces stay
/// in the arena marked dead so that ids remain stable. The grid holds ids of
/// live pieces only, and a live piece's stored position always matches its
/// grid slot.
///
/// The board knows nothing about turns or rules: it only enforces bounds and
/// single occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<PieceId>; BOARD_SIZE]; BOARD_SIZE],
    pieces: Vec<Piece>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_in_bounds(x: i32, y: i32) -> bool {
        Position::try_new(x, y).is_some()
    }

    #[must_use]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        let id = self.grid[position.y()][position.x()]?;
        Some(&self.pieces[id.index()])
    }

    #[must_use]
    pub fn piece_at_xy(&self, x: i32, y: i32) -> Option<&Piece> {
        self.piece_at(Position::try_new(x, y)?)
    }

    #[must_use]
    pub fn is_empty_at(&self, position: Position) -> bool {
        self.grid[position.y()][position.x()].is_none()
    }

    /// Live pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(|p| p.is_alive())
    }

    pub fn pieces_of(&self, owner: Player) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.owner() == owner)
    }

    pub fn pieces_of_kind(&self, kind: PieceKind) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.kind() == kind)
    }

    /// First live piece of `kind` owned by `owner`.
    #[must_use]
    pub fn find_piece(&self, kind: PieceKind, owner: Player) -> Option<&Piece> {
        self.pieces_of(owner).find(|p| p.kind() == kind)
    }

    /// Looks up a piece by id, dead or alive.
    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Result<&mut Piece, BoardError> {
        self.pieces
            .get_mut(id.index())
            .filter(|p| p.is_alive())
            .ok_or(BoardError::UnknownPiece { id })
    }

    /// Places a new piece and returns its id.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        owner: Player,
        position: Position,
        facing: Direction,
    ) -> Result<PieceId, BoardError> {
        if !self.is_empty_at(position) {
            return Err(BoardError::CellOccupied { position });
        }
        #[expect(clippy::cast_possible_truncation)]
        let id = PieceId::new(self.pieces.len() as u16);
        self.pieces
            .push(Piece::new(id, kind, owner, position, facing));
        self.grid[position.y()][position.x()] = Some(id);
        Ok(id)
    }

    /// Clears the piece's cell and marks it dead.
    pub fn remove_piece(&mut self, id: PieceId) -> Result<Piece, BoardError> {
        let piece = self.piece_mut(id)?;
        piece.kill();
        let piece = *piece;
        let position = piece.position();
        self.grid[position.y()][position.x()] = None;
        Ok(piece)
    }

    /// Moves a piece to `(x, y)` without checking any game rule.
    pub fn move_piece(&mut self, id: PieceId, x: i32, y: i32) -> Result<(), BoardError> {
        let to = Position::try_new(x, y).ok_or(BoardError::OutOfBounds { x, y })?;
        let from = self.piece_mut(id)?.position();
        if from == to {
            return Ok(());
        }
        if !self.is_empty_at(to) {
            return Err(BoardError::CellOccupied { position: to });
        }
        self.piece_mut(id)?.set_position(to);
        self.grid[from.y()][from.x()] = None;
        self.grid[to.y()][to.x()] = Some(id);
        Ok(())
    }

    /// Exchanges the cells of two live pieces.
    pub fn swap_positions(&mut self, a: PieceId, b: PieceId) -> Result<(), BoardError> {
        let pos_a = self.piece_mut(a)?.position();
        let pos_b = self.piece_mut(b)?.position();
        self.piece_mut(a)?.set_position(pos_b);
        self.piece_mut(b)?.set_position(pos_a);
        self.grid[pos_a.y()][pos_a.x()] = Some(b);
        self.grid[pos_b.y()][pos_b.x()] = Some(a);
        Ok(())
    }

    pub(crate) fn set_facing(&mut self, id: PieceId, facing: Direction) -> Result<(), BoardError> {
        self.piece_mut(id)?.set_facing(facing);
        Ok(())
    }

    /// Orthogonal neighbours of `position` that hold a piece.
    #[must_use]
    pub fn adjacent_pieces(&self, position: Position) -> AdjacentPieces<'_> {
        position
            .neighbors()
            .into_iter()
            .filter_map(|neighbor| self.piece_at(neighbor))
            .collect()
    }

    /// Decrements the swap cooldowns of every live DualMirror owned by `owner`.
    pub(crate) fn tick_swap_cooldowns(&mut self, owner: Player) {
        for piece in &mut self.pieces {
            if piece.is_alive()
                && piece.owner() == owner
                && let Some(cooldowns) = piece.cooldowns_mut()
            {
                cooldowns.tick();
            }
        }
    }
}

/// Renders the board as a text grid.
///
/// Each cell is two characters: the piece kind (uppercase for player 1,
/// lowercase for player 2) followed by a facing arrow, or `. ` when empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                let Some(id) = cell else {
                    f.write_str(". ")?;
                    continue;
                };
                let piece = &self.pieces[id.index()];
                let kind = match piece.owner() {
                    Player::One => piece.kind().as_char(),
                    Player::Two => piece.kind().as_char().to_ascii_lowercase(),
                };
                let arrow = match piece.facing() {
                    Direction::East => '>',
                    Direction::South => 'v',
                    Direction::West => '<',
                    Direction::North => '^',
                };
                write!(f, "{kind}{arrow}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut board = Board::new();
        let id = board
            .add_piece(
                PieceKind::Mirror,
                Player::One,
                Position::new(2, 3),
                Direction::East,
            )
            .unwrap();
        let piece = board.piece_at(Position::new(2, 3)).unwrap();
        assert_eq!(piece.id(), id);
        assert_eq!(piece.position(), Position::new(2, 3));
        assert_eq!(board.piece_at_xy(2, 3).map(Piece::id), Some(id));
        assert!(board.piece_at_xy(-1, 3).is_none());
        assert!(board.piece_at_xy(3, 2).is_none());
    }

    #[test]
    fn test_add_to_occupied_cell_fails() {
        let mut board = Board::new();
        let pos = Position::new(0, 0);
        board
            .add_piece(PieceKind::Royal, Player::One, pos, Direction::East)
            .unwrap();
        assert_eq!(
            board.add_piece(PieceKind::Shield, Player::Two, pos, Direction::East),
            Err(BoardError::CellOccupied { position: pos })
        );
    }

    #[test]
    fn test_remove_piece() {
        let mut board = Board::new();
        let id = board
            .add_piece(
                PieceKind::Shield,
                Player::Two,
                Position::new(4, 4),
                Direction::North,
            )
            .unwrap();
        let removed = board.remove_piece(id).unwrap();
        assert!(!removed.is_alive());
        assert!(board.is_empty_at(Position::new(4, 4)));
        assert_eq!(board.pieces().count(), 0);
        assert!(!board.get(id).unwrap().is_alive());
        assert_eq!(
            board.remove_piece(id),
            Err(BoardError::UnknownPiece { id })
        );
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::new();
        let a = board
            .add_piece(
                PieceKind::Mirror,
                Player::One,
                Position::new(1, 1),
                Direction::East,
            )
            .unwrap();
        board
            .add_piece(
                PieceKind::Mirror,
                Player::One,
                Position::new(5, 5),
                Direction::East,
            )
            .unwrap();

        board.move_piece(a, 7, 2).unwrap();
        assert!(board.is_empty_at(Position::new(1, 1)));
        assert_eq!(board.get(a).unwrap().position(), Position::new(7, 2));
        assert_eq!(board.piece_at(Position::new(7, 2)).unwrap().id(), a);

        assert_eq!(
            board.move_piece(a, 10, 2),
            Err(BoardError::OutOfBounds { x: 10, y: 2 })
        );
        assert_eq!(
            board.move_piece(a, 5, 5),
            Err(BoardError::CellOccupied {
                position: Position::new(5, 5)
            })
        );
        assert_eq!(board.get(a).unwrap().position(), Position::new(7, 2));
    }

    #[test]
    fn test_swap_positions() {
        let mut board = Board::new();
        let a = board
            .add_piece(
                PieceKind::DualMirror,
                Player::One,
                Position::new(1, 3),
                Direction::East,
            )
            .unwrap();
        let b = board
            .add_piece(
                PieceKind::Royal,
                Player::One,
                Position::new(6, 2),
                Direction::East,
            )
            .unwrap();
        board.swap_positions(a, b).unwrap();
        assert_eq!(board.get(a).unwrap().position(), Position::new(6, 2));
        assert_eq!(board.get(b).unwrap().position(), Position::new(1, 3));
        assert_eq!(board.piece_at(Position::new(6, 2)).unwrap().id(), a);
        assert_eq!(board.piece_at(Position::new(1, 3)).unwrap().id(), b);
    }

    #[test]
    fn test_adjacent_pieces() {
        let mut board = Board::new();
        let center = Position::new(4, 4);
        board
            .add_piece(
                PieceKind::Shield,
                Player::One,
                Position::new(4, 3),
                Direction::East,
            )
            .unwrap();
        board
            .add_piece(
                PieceKind::Shield,
                Player::Two,
                Position::new(5, 4),
                Direction::East,
            )
            .unwrap();
        board
            .add_piece(
                PieceKind::Shield,
                Player::Two,
                Position::new(5, 5),
                Direction::East,
            )
            .unwrap();
        assert_eq!(board.adjacent_pieces(center).len(), 2);
        assert!(board.adjacent_pieces(Position::new(0, 9)).is_empty());
    }

    #[test]
    fn test_tick_swap_cooldowns_only_for_owner() {
        let mut board = Board::new();
        let mine = board
            .add_piece(
                PieceKind::DualMirror,
                Player::One,
                Position::new(0, 3),
                Direction::East,
            )
            .unwrap();
        let theirs = board
            .add_piece(
                PieceKind::DualMirror,
                Player::Two,
                Position::new(9, 6),
                Direction::West,
            )
            .unwrap();
        for id in [mine, theirs] {
            let cooldowns = board.piece_mut(id).unwrap().cooldowns_mut().unwrap();
            cooldowns.emitter = 3;
            cooldowns.royal = 1;
        }
        board.tick_swap_cooldowns(Player::One);
        let mine = board.get(mine).unwrap().cooldowns().unwrap();
        let theirs = board.get(theirs).unwrap().cooldowns().unwrap();
        assert_eq!((mine.emitter, mine.royal), (2, 0));
        assert_eq!((theirs.emitter, theirs.royal), (3, 1));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board
            .add_piece(
                PieceKind::Emitter,
                Player::One,
                Position::new(0, 0),
                Direction::South,
            )
            .unwrap();
        board
            .add_piece(
                PieceKind::Royal,
                Player::Two,
                Position::new(1, 0),
                Direction::West,
            )
            .unwrap();
        let text = board.to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("Ev r<"));
        assert_eq!(text.lines().count(), BOARD_SIZE);
    }
}
