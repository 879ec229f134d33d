use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::BoardError;

use super::BOARD_SIZE;

/// One of the two sides of a match.
///
/// Serialized as the player number (`1` or `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid player number {number}, expected 1 or 2")]
pub struct InvalidPlayerError {
    number: u8,
}

impl TryFrom<u8> for Player {
    type Error = InvalidPlayerError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(InvalidPlayerError { number }),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.number()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

impl Player {
    pub const ALL: [Self; 2] = [Player::One, Player::Two];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Zero-based index for per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Compass direction, also used as a piece facing.
///
/// The board uses screen coordinates: `x` grows to the East, `y` grows to the
/// South. Directions serialize as degrees measured clockwise from East:
///
/// | Direction | Degrees | Vector    |
/// |-----------|---------|-----------|
/// | East      | 0       | (1, 0)    |
/// | South     | 90      | (0, 1)    |
/// | West      | 180     | (-1, 0)   |
/// | North     | 270     | (0, -1)   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Direction {
    East,
    South,
    West,
    North,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid facing {degrees}, expected 0, 90, 180 or 270")]
pub struct InvalidFacingError {
    degrees: u16,
}

impl TryFrom<u16> for Direction {
    type Error = InvalidFacingError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Direction::from_degrees(degrees).ok_or(InvalidFacingError { degrees })
    }
}

impl From<Direction> for u16 {
    fn from(direction: Direction) -> Self {
        direction.degrees()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
            Direction::North => "north",
        };
        f.write_str(name)
    }
}

impl Direction {
    /// All directions in clockwise order starting from East.
    pub const ALL: [Self; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Direction::East => 0,
            Direction::South => 90,
            Direction::West => 180,
            Direction::North => 270,
        }
    }

    #[must_use]
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Direction::East),
            90 => Some(Direction::South),
            180 => Some(Direction::West),
            270 => Some(Direction::North),
            _ => None,
        }
    }

    /// Unit step `(dx, dy)` for this direction.
    #[must_use]
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::North => Direction::South,
        }
    }

    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        match self {
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::North => Direction::East,
        }
    }

    #[must_use]
    pub const fn rotated_counterclockwise(self) -> Self {
        match self {
            Direction::East => Direction::North,
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
        }
    }
}

/// Raw, unchecked cell coordinates as they arrive from outside the core.
///
/// Actions carry `Cell`s so that out-of-bounds input is reported as a rule
/// violation by the action executor instead of failing at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Cell {
    fn from(position: Position) -> Self {
        Self {
            x: position.x.into(),
            y: position.y.into(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell that is guaranteed to lie on the board.
///
/// (0, 0) is the top-left corner; `x` grows rightward and `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Cell")]
pub struct Position {
    x: u8,
    y: u8,
}

impl TryFrom<Cell> for Position {
    type Error = BoardError;

    fn try_from(cell: Cell) -> Result<Self, Self::Error> {
        Position::try_new(cell.x, cell.y).ok_or(BoardError::OutOfBounds {
            x: cell.x,
            y: cell.y,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    #[expect(clippy::cast_possible_truncation)]
    const LAST: u8 = (BOARD_SIZE - 1) as u8;

    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!((x as usize) < BOARD_SIZE);
        assert!((y as usize) < BOARD_SIZE);
        Self { x, y }
    }

    /// Returns the position at `(x, y)`, or `None` if it lies off the board.
    #[must_use]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        let x = u8::try_from(x).ok()?;
        let y = u8::try_from(y).ok()?;
        ((x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE).then_some(Self { x, y })
    }

    #[must_use]
    pub fn x(self) -> usize {
        usize::from(self.x)
    }

    #[must_use]
    pub fn y(self) -> usize {
        usize::from(self.y)
    }

    /// The neighbouring position one step in `direction`, if it is on the board.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.vector();
        Self::try_new(i32::from(self.x) + dx, i32::from(self.y) + dy)
    }

    /// The up-to-four orthogonal neighbours that lie on the board.
    #[must_use]
    pub fn neighbors(self) -> ArrayVec<Self, 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.step(direction))
            .collect()
    }

    #[must_use]
    pub fn is_orthogonally_adjacent(self, other: Self) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// Point reflection through the board center.
    #[must_use]
    pub const fn rotated_half_turn(self) -> Self {
        Self {
            x: Self::LAST - self.x,
            y: Self::LAST - self.y,
        }
    }
}
