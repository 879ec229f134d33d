//! Pure reflection and blocking geometry.
//!
//! Nothing in this module looks at a board: every function maps a piece facing
//! and the direction a beam is travelling to the beam's fate at that cell.
//!
//! # Mirror geometry
//!
//! A Mirror's facing selects one of two diagonal classes:
//!
//! | Facing    | Class | Reflective sides |
//! |-----------|-------|------------------|
//! | 0 (East)  | `/`   | North, West      |
//! | 90 (South)| `\`   | North, East      |
//! | 180 (West)| `/`   | South, East      |
//! | 270 (North)| `\`  | South, West      |
//!
//! A beam "enters through" the side opposite to its travel direction: a beam
//! travelling East enters through the West side. If that side is not
//! reflective the Mirror is hit on its back and destroyed.

use super::Direction;

/// Diagonal orientation of a Mirror, selected by `facing mod 180`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorClass {
    /// `/`: East ↔ North, West ↔ South.
    Slash,
    /// `\`: East ↔ South, West ↔ North.
    Backslash,
}

impl MirrorClass {
    #[must_use]
    pub const fn from_facing(facing: Direction) -> Self {
        match facing {
            Direction::East | Direction::West => MirrorClass::Slash,
            Direction::South | Direction::North => MirrorClass::Backslash,
        }
    }

    /// The outgoing direction of a beam reflected by this diagonal.
    #[must_use]
    pub const fn reflect(self, incoming: Direction) -> Direction {
        match (self, incoming) {
            (MirrorClass::Slash, Direction::East) => Direction::North,
            (MirrorClass::Slash, Direction::North) => Direction::East,
            (MirrorClass::Slash, Direction::West) => Direction::South,
            (MirrorClass::Slash, Direction::South) => Direction::West,
            (MirrorClass::Backslash, Direction::East) => Direction::South,
            (MirrorClass::Backslash, Direction::South) => Direction::East,
            (MirrorClass::Backslash, Direction::West) => Direction::North,
            (MirrorClass::Backslash, Direction::North) => Direction::West,
        }
    }
}

/// The two sides of a Mirror that reflect a beam entering through them.
#[must_use]
pub const fn mirror_reflective_sides(facing: Direction) -> [Direction; 2] {
    match facing {
        Direction::East => [Direction::North, Direction::West],
        Direction::South => [Direction::North, Direction::East],
        Direction::West => [Direction::South, Direction::East],
        Direction::North => [Direction::South, Direction::West],
    }
}

#[must_use]
pub fn is_reflective_side(facing: Direction, incoming: Direction) -> bool {
    mirror_reflective_sides(facing).contains(&incoming.opposite())
}

/// Reflects a beam off a Mirror, or `None` if the beam hits its back.
#[must_use]
pub fn reflect_on_mirror(facing: Direction, incoming: Direction) -> Option<Direction> {
    is_reflective_side(facing, incoming).then(|| MirrorClass::from_facing(facing).reflect(incoming))
}

/// Reflects a beam off a DualMirror.
///
/// Any entry side reflects, always turning the beam 90° counterclockwise:
/// East → North → West → South → East.
#[must_use]
pub const fn reflect_on_dual_mirror(incoming: Direction) -> Direction {
    incoming.rotated_counterclockwise()
}

/// A Shield stops a beam only when it faces the beam head-on.
#[must_use]
pub fn is_shield_blocking(facing: Direction, incoming: Direction) -> bool {
    facing == incoming.opposite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_mirror_reflects_east_to_north() {
        assert_eq!(
            reflect_on_mirror(Direction::East, Direction::East),
            Some(Direction::North)
        );
        assert_eq!(
            reflect_on_mirror(Direction::East, Direction::South),
            Some(Direction::West)
        );
    }

    #[test]
    fn test_mirror_back_side_is_not_reflective() {
        // facing 0 reflects through North and West only
        assert_eq!(reflect_on_mirror(Direction::East, Direction::North), None);
        assert_eq!(reflect_on_mirror(Direction::East, Direction::West), None);
        assert!(!is_reflective_side(Direction::East, Direction::West));
    }

    #[test]
    fn test_each_facing_has_two_reflective_entries() {
        for facing in Direction::ALL {
            let reflecting = Direction::ALL
                .into_iter()
                .filter(|&incoming| reflect_on_mirror(facing, incoming).is_some())
                .count();
            assert_eq!(reflecting, 2, "facing {facing}");
            for incoming in Direction::ALL {
                assert_eq!(
                    is_reflective_side(facing, incoming),
                    reflect_on_mirror(facing, incoming).is_some()
                );
            }
        }
    }

    #[test]
    fn test_reflection_turns_ninety_degrees() {
        for facing in Direction::ALL {
            for incoming in Direction::ALL {
                if let Some(outgoing) = reflect_on_mirror(facing, incoming) {
                    assert_ne!(outgoing, incoming);
                    assert_ne!(outgoing, incoming.opposite());
                }
            }
        }
    }

    #[test]
    fn test_opposite_facings_round_trip() {
        // Two mirrors of the same class facing opposite ways return the beam
        // to its original heading.
        for facing in Direction::ALL {
            for incoming in Direction::ALL {
                let Some(mid) = reflect_on_mirror(facing, incoming) else {
                    continue;
                };
                let back = reflect_on_mirror(facing.opposite(), mid);
                assert_eq!(back, Some(incoming), "facing {facing}, incoming {incoming}");
            }
        }
    }

    #[test]
    fn test_dual_mirror_bijection() {
        assert_eq!(reflect_on_dual_mirror(Direction::East), Direction::North);
        assert_eq!(reflect_on_dual_mirror(Direction::North), Direction::West);
        assert_eq!(reflect_on_dual_mirror(Direction::West), Direction::South);
        assert_eq!(reflect_on_dual_mirror(Direction::South), Direction::East);
    }

    #[test]
    fn test_shield_blocks_head_on_only() {
        assert!(is_shield_blocking(Direction::North, Direction::South));
        assert!(is_shield_blocking(Direction::West, Direction::East));
        assert!(!is_shield_blocking(Direction::North, Direction::North));
        assert!(!is_shield_blocking(Direction::North, Direction::East));
    }
}
