use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{Direction, Player, Position, laser_physics};

/// Initial value of a DualMirror swap cooldown after a swap.
pub const SWAP_COOLDOWN: u8 = 4;

/// Identifier of a piece, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(u16);

impl PieceId {
    #[must_use]
    pub(crate) const fn new(index: u16) -> Self {
        Self(index)
    }

    #[must_use]
    pub(crate) fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a piece.
///
/// The set is closed: every rule that depends on the kind is a `match` in this
/// module, so adding a kind is a compile error everywhere it must be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceKind {
    /// Destroyed by any hit; losing it loses the match.
    Royal,
    /// Fires the owner's laser; blocks every beam.
    Emitter,
    /// Blocks a beam arriving head-on, destroyed otherwise.
    Shield,
    /// Reflects through two sides, destroyed through the other two.
    Mirror,
    /// Reflects through every side; can swap with its owner's Emitter or Royal.
    DualMirror,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Royal => "royal",
            PieceKind::Emitter => "emitter",
            PieceKind::Shield => "shield",
            PieceKind::Mirror => "mirror",
            PieceKind::DualMirror => "dual mirror",
        };
        f.write_str(name)
    }
}

/// What happens to a beam entering a cell occupied by a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserInteraction {
    /// The beam stops; the piece survives.
    Block,
    /// The piece is destroyed; the beam continues straight on.
    Destroy,
    /// The beam leaves the cell in the given direction.
    Reflect(Direction),
}

impl PieceKind {
    pub const ALL: [Self; 5] = [
        PieceKind::Royal,
        PieceKind::Emitter,
        PieceKind::Shield,
        PieceKind::Mirror,
        PieceKind::DualMirror,
    ];

    #[must_use]
    pub const fn can_move(self) -> bool {
        match self {
            PieceKind::Royal | PieceKind::Emitter => false,
            PieceKind::Shield | PieceKind::Mirror | PieceKind::DualMirror => true,
        }
    }

    #[must_use]
    pub const fn can_rotate(self) -> bool {
        match self {
            PieceKind::Royal => false,
            PieceKind::Emitter | PieceKind::Shield | PieceKind::Mirror | PieceKind::DualMirror => {
                true
            }
        }
    }

    /// Resolves a beam travelling in `incoming` against a piece of this kind.
    #[must_use]
    pub fn interact(self, facing: Direction, incoming: Direction) -> LaserInteraction {
        match self {
            PieceKind::Royal => LaserInteraction::Destroy,
            PieceKind::Emitter => LaserInteraction::Block,
            PieceKind::Shield => {
                if laser_physics::is_shield_blocking(facing, incoming) {
                    LaserInteraction::Block
                } else {
                    LaserInteraction::Destroy
                }
            }
            PieceKind::Mirror => laser_physics::reflect_on_mirror(facing, incoming)
                .map_or(LaserInteraction::Destroy, LaserInteraction::Reflect),
            PieceKind::DualMirror => {
                LaserInteraction::Reflect(laser_physics::reflect_on_dual_mirror(incoming))
            }
        }
    }

    /// Sides through which an incoming beam does not destroy the piece.
    #[must_use]
    pub fn shield_sides(self, facing: Direction) -> ShieldSides {
        match self {
            PieceKind::Royal => ShieldSides::NONE,
            PieceKind::Emitter | PieceKind::DualMirror => ShieldSides::ALL,
            PieceKind::Shield => ShieldSides::from_sides(&[facing]),
            PieceKind::Mirror => {
                ShieldSides::from_sides(&laser_physics::mirror_reflective_sides(facing))
            }
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::Royal => 'R',
            PieceKind::Emitter => 'E',
            PieceKind::Shield => 'S',
            PieceKind::Mirror => 'M',
            PieceKind::DualMirror => 'D',
        }
    }
}

/// Per-side protection flags of a piece.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldSides {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl ShieldSides {
    pub const NONE: Self = Self {
        north: false,
        east: false,
        south: false,
        west: false,
    };
    pub const ALL: Self = Self {
        north: true,
        east: true,
        south: true,
        west: true,
    };

    fn from_sides(sides: &[Direction]) -> Self {
        let mut result = Self::NONE;
        for side in sides {
            match side {
                Direction::North => result.north = true,
                Direction::East => result.east = true,
                Direction::South => result.south = true,
                Direction::West => result.west = true,
            }
        }
        result
    }

    #[must_use]
    pub fn contains(self, side: Direction) -> bool {
        match side {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// The two pieces a DualMirror may swap places with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapTarget {
    Emitter,
    Royal,
}

impl fmt::Display for SwapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapTarget::Emitter => f.write_str("emitter"),
            SwapTarget::Royal => f.write_str("royal"),
        }
    }
}

impl SwapTarget {
    #[must_use]
    pub const fn from_kind(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Emitter => Some(SwapTarget::Emitter),
            PieceKind::Royal => Some(SwapTarget::Royal),
            PieceKind::Shield | PieceKind::Mirror | PieceKind::DualMirror => None,
        }
    }
}

/// Remaining owner turns before a DualMirror may swap again.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapCooldowns {
    pub emitter: u8,
    pub royal: u8,
}

impl SwapCooldowns {
    #[must_use]
    pub const fn get(self, target: SwapTarget) -> u8 {
        match target {
            SwapTarget::Emitter => self.emitter,
            SwapTarget::Royal => self.royal,
        }
    }

    pub fn set(&mut self, target: SwapTarget, value: u8) {
        let slot = match target {
            SwapTarget::Emitter => &mut self.emitter,
            SwapTarget::Royal => &mut self.royal,
        };
        *slot = value.min(SWAP_COOLDOWN);
    }

    #[must_use]
    pub const fn is_ready(self, target: SwapTarget) -> bool {
        self.get(target) == 0
    }

    /// Decrements both cooldowns, saturating at zero.
    pub fn tick(&mut self) {
        self.emitter = self.emitter.saturating_sub(1);
        self.royal = self.royal.saturating_sub(1);
    }
}

/// A piece on the board.
///
/// `cooldowns` is `Some` exactly for DualMirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    owner: Player,
    position: Position,
    facing: Direction,
    alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cooldowns: Option<SwapCooldowns>,
}

impl Piece {
    #[must_use]
    pub(crate) fn new(
        id: PieceId,
        kind: PieceKind,
        owner: Player,
        position: Position,
        facing: Direction,
    ) -> Self {
        let cooldowns = (kind == PieceKind::DualMirror).then(SwapCooldowns::default);
        Self {
            id,
            kind,
            owner,
            position,
            facing,
            alive: true,
            cooldowns,
        }
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn owner(&self) -> Player {
        self.owner
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn cooldowns(&self) -> Option<SwapCooldowns> {
        self.cooldowns
    }

    #[must_use]
    pub fn can_move(&self) -> bool {
        self.kind.can_move()
    }

    #[must_use]
    pub fn can_rotate(&self) -> bool {
        self.kind.can_rotate()
    }

    #[must_use]
    pub fn interact(&self, incoming: Direction) -> LaserInteraction {
        self.kind.interact(self.facing, incoming)
    }

    #[must_use]
    pub fn shield_sides(&self) -> ShieldSides {
        self.kind.shield_sides(self.facing)
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    pub(crate) fn cooldowns_mut(&mut self) -> Option<&mut SwapCooldowns> {
        self.cooldowns.as_mut()
    }
}

/// Pieces adjacent to a cell, clockwise from East.
pub type AdjacentPieces<'a> = ArrayVec<&'a Piece, 4>;
