use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BOARD_SIZE, Board, Direction, PieceKind, Player, Position};

/// Row of player 1's Emitter.
const EMITTER_ROW: u8 = 0;
/// Row of player 1's Royal and second Shield.
const ROYAL_ROW: u8 = 2;
/// Row of player 1's DualMirror.
const DUAL_MIRROR_ROW: u8 = 3;
/// Row of player 1's first Shield, in the Royal's column.
const FRONT_SHIELD_ROW: u8 = 4;

#[expect(clippy::cast_possible_truncation)]
const LAST: u8 = (BOARD_SIZE - 1) as u8;

/// Seed for deterministic board setup.
///
/// A 128-bit seed for the [`Pcg32`] generator that chooses the starting
/// columns and facings. The same seed always produces the same board.
///
/// Serialized (and parsed with [`FromStr`]) as a 32-character hex string.
///
/// # Example
///
/// ```
/// use deflect_engine::{SetupSeed, initial_board};
/// use rand::Rng as _;
///
/// let seed: SetupSeed = rand::rng().random();
/// assert_eq!(initial_board(seed), initial_board(seed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex characters")]
pub struct InvalidSeedError {
    input: String,
}

impl SetupSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for SetupSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SetupSeed {
    type Err = InvalidSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| invalid())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SetupSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SetupSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<SetupSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SetupSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SetupSeed(seed)
    }
}

/// Builds the starting board for `seed`.
///
/// Player 1's pieces occupy the top rows:
///
/// - Emitter on row 0 at a random column, facing the longer half of the row
/// - Royal on row 2, avoiding the edge columns, the Emitter's column and its
///   mirror column
/// - Shield two rows below the Royal, and a second Shield on row 2 in the
///   Emitter's mirror column, both facing South
/// - DualMirror on row 3 at a random column, facing East or South
///
/// Player 2 receives the same layout rotated 180° about the board center.
#[must_use]
pub fn initial_board(seed: SetupSeed) -> Board {
    let mut rng = Pcg32::from_seed(seed.0);
    let layout = player_one_layout(&mut rng);

    let mut board = Board::new();
    for &(kind, position, facing) in &layout {
        board
            .add_piece(kind, Player::One, position, facing)
            .expect("player 1 layout cells are distinct");
    }
    for &(kind, position, facing) in &layout {
        board
            .add_piece(
                kind,
                Player::Two,
                position.rotated_half_turn(),
                facing.opposite(),
            )
            .expect("player 2 layout lies on rows disjoint from player 1");
    }
    tracing::debug!(%seed, "board set up");
    board
}

type Placement = (PieceKind, Position, Direction);

fn player_one_layout<R>(rng: &mut R) -> [Placement; 5]
where
    R: Rng + ?Sized,
{
    let emitter_x = rng.random_range(0..=LAST);
    let mirror_x = LAST - emitter_x;
    let emitter_facing = if emitter_x > mirror_x {
        Direction::West
    } else {
        Direction::East
    };

    let royal_columns = (1..LAST)
        .filter(|&x| x != emitter_x && x != mirror_x)
        .collect::<ArrayVec<u8, BOARD_SIZE>>();
    let royal_x = royal_columns[rng.random_range(0..royal_columns.len())];

    let dual_x = rng.random_range(0..=LAST);
    let dual_facing = if rng.random_bool(0.5) {
        Direction::East
    } else {
        Direction::South
    };

    [
        (
            PieceKind::Emitter,
            Position::new(emitter_x, EMITTER_ROW),
            emitter_facing,
        ),
        (
            PieceKind::Royal,
            Position::new(royal_x, ROYAL_ROW),
            Direction::South,
        ),
        (
            PieceKind::Shield,
            Position::new(royal_x, FRONT_SHIELD_ROW),
            Direction::South,
        ),
        (
            PieceKind::Shield,
            Position::new(mirror_x, ROYAL_ROW),
            Direction::South,
        ),
        (
            PieceKind::DualMirror,
            Position::new(dual_x, DUAL_MIRROR_ROW),
            dual_facing,
        ),
    ]
}
