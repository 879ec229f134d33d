use serde::{Deserialize, Serialize};

use crate::{Board, Direction, LaserInteraction, Piece, PieceId, PieceKind, Player};

/// Maximum number of beam steps before a trace is cut short.
///
/// Closed mirror cycles never reach an edge or a blocking piece.
pub const LASER_ITERATION_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaserEventKind {
    /// The beam leaves the Emitter's cell.
    Start,
    /// The beam crosses an empty cell.
    Path,
    /// The beam leaves the board; `x`/`y` is the first off-board cell.
    Exit,
    Block,
    Destroy,
    Reflect,
}

/// One step of a laser trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaserEvent {
    #[serde(rename = "type")]
    pub kind: LaserEventKind,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece: Option<Piece>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_direction: Option<Direction>,
}

impl LaserEvent {
    fn at(kind: LaserEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            piece: None,
            new_direction: None,
        }
    }

    fn with_piece(kind: LaserEventKind, piece: &Piece) -> Self {
        let position = piece.position();
        Self {
            piece: Some(*piece),
            ..Self::at(kind, to_i32(position.x()), to_i32(position.y()))
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn to_i32(v: usize) -> i32 {
    v as i32
}

/// Ordered result of firing one Emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaserTrace {
    pub firing_player: Player,
    pub events: Vec<LaserEvent>,
    /// `true` if the beam was still travelling after [`LASER_ITERATION_LIMIT`] steps.
    pub capped: bool,
}

impl LaserTrace {
    #[must_use]
    pub fn empty(firing_player: Player) -> Self {
        Self {
            firing_player,
            events: vec![],
            capped: false,
        }
    }

    /// Pieces hit by a `DESTROY` event, each reported once, in hit order.
    #[must_use]
    pub fn destroyed_pieces(&self) -> Vec<Piece> {
        let mut seen: Vec<PieceId> = vec![];
        self.events
            .iter()
            .filter(|event| event.kind == LaserEventKind::Destroy)
            .filter_map(|event| event.piece)
            .filter(|piece| {
                if seen.contains(&piece.id()) {
                    false
                } else {
                    seen.push(piece.id());
                    true
                }
            })
            .collect()
    }

    #[must_use]
    pub fn count(&self, kind: LaserEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Whether a `DESTROY` event hit a Royal owned by `owner`.
    #[must_use]
    pub fn destroys_royal_of(&self, owner: Player) -> bool {
        self.destroyed_pieces()
            .iter()
            .any(|p| p.kind() == PieceKind::Royal && p.owner() == owner)
    }
}

/// Traces the beam of `firing_player`'s Emitter across `board`.
///
/// The beam starts at the Emitter's cell and repeatedly steps one cell in its
/// current direction:
///
/// - off the board: `EXIT`, stop
/// - empty cell: `PATH`, continue
/// - `BLOCK`: stop
/// - `DESTROY`: continue straight on; the piece stays on the board until the
///   caller removes it
/// - `REFLECT`: change direction and step on from the same cell
///
/// The board is never mutated. A player without an Emitter produces an empty
/// trace.
#[must_use]
pub fn simulate(board: &Board, firing_player: Player) -> LaserTrace {
    let Some(emitter) = board.find_piece(PieceKind::Emitter, firing_player) else {
        tracing::warn!(player = %firing_player, "no emitter found, laser not fired");
        return LaserTrace::empty(firing_player);
    };

    let mut trace = LaserTrace::empty(firing_player);
    trace
        .events
        .push(LaserEvent::with_piece(LaserEventKind::Start, emitter));

    let mut x = to_i32(emitter.position().x());
    let mut y = to_i32(emitter.position().y());
    let mut direction = emitter.facing();
    let mut finished = false;

    for _ in 0..LASER_ITERATION_LIMIT {
        let (dx, dy) = direction.vector();
        x += dx;
        y += dy;

        if !Board::is_in_bounds(x, y) {
            trace.events.push(LaserEvent::at(LaserEventKind::Exit, x, y));
            finished = true;
            break;
        }
        let Some(target) = board.piece_at_xy(x, y) else {
            trace.events.push(LaserEvent::at(LaserEventKind::Path, x, y));
            continue;
        };

        match target.interact(direction) {
            LaserInteraction::Block => {
                trace
                    .events
                    .push(LaserEvent::with_piece(LaserEventKind::Block, target));
                finished = true;
                break;
            }
            LaserInteraction::Destroy => {
                trace
                    .events
                    .push(LaserEvent::with_piece(LaserEventKind::Destroy, target));
            }
            LaserInteraction::Reflect(new_direction) => {
                trace.events.push(LaserEvent {
                    new_direction: Some(new_direction),
                    ..LaserEvent::with_piece(LaserEventKind::Reflect, target)
                });
                direction = new_direction;
            }
        }
    }

    if !finished {
        trace.capped = true;
        tracing::warn!(
            player = %firing_player,
            limit = LASER_ITERATION_LIMIT,
            "laser iteration limit reached, trace truncated"
        );
    }
    tracing::debug!(
        player = %firing_player,
        events = trace.events.len(),
        destroyed = trace.count(LaserEventKind::Destroy),
        "laser fired"
    );
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn board_with(pieces: &[(PieceKind, Player, (u8, u8), Direction)]) -> Board {
        let mut board = Board::new();
        for &(kind, owner, (x, y), facing) in pieces {
            board
                .add_piece(kind, owner, Position::new(x, y), facing)
                .unwrap();
        }
        board
    }

    fn kinds(trace: &LaserTrace) -> Vec<LaserEventKind> {
        trace.events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_no_emitter_gives_empty_trace() {
        let board = board_with(&[(
            PieceKind::Royal,
            Player::One,
            (4, 4),
            Direction::East,
        )]);
        let trace = simulate(&board, Player::One);
        assert!(trace.events.is_empty());
        assert!(!trace.capped);
    }

    #[test]
    fn test_straight_shot_destroys_royal_and_exits() {
        use LaserEventKind::{Destroy, Exit, Path, Start};

        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (5, 0), Direction::South),
            (PieceKind::Royal, Player::Two, (5, 5), Direction::North),
        ]);
        let trace = simulate(&board, Player::One);
        assert_eq!(
            kinds(&trace),
            [Start, Path, Path, Path, Path, Destroy, Path, Path, Path, Path, Exit]
        );
        let destroy = trace.events[5];
        assert_eq!((destroy.x, destroy.y), (5, 5));
        assert_eq!(destroy.piece.unwrap().kind(), PieceKind::Royal);
        assert_eq!(trace.events.last().unwrap().y, 10);
        assert!(trace.destroys_royal_of(Player::Two));
        assert!(!trace.destroys_royal_of(Player::One));
    }

    #[test]
    fn test_beam_passes_through_destroyed_piece() {
        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (0, 4), Direction::East),
            (PieceKind::Shield, Player::Two, (2, 4), Direction::North),
            (PieceKind::Royal, Player::Two, (6, 4), Direction::North),
        ]);
        let trace = simulate(&board, Player::One);
        let destroyed = trace.destroyed_pieces();
        assert_eq!(destroyed.len(), 2);
        assert_eq!(destroyed[0].kind(), PieceKind::Shield);
        assert_eq!(destroyed[1].kind(), PieceKind::Royal);
        assert_eq!(trace.events.last().unwrap().kind, LaserEventKind::Exit);
        assert!(board.piece_at(Position::new(2, 4)).is_some());
    }

    #[test]
    fn test_shield_blocks_head_on() {
        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (0, 4), Direction::East),
            (PieceKind::Shield, Player::Two, (3, 4), Direction::West),
        ]);
        let trace = simulate(&board, Player::One);
        let last = trace.events.last().unwrap();
        assert_eq!(last.kind, LaserEventKind::Block);
        assert_eq!((last.x, last.y), (3, 4));
        assert!(trace.destroyed_pieces().is_empty());
    }

    #[test]
    fn test_mirror_reflects_east_beam_north() {
        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (0, 3), Direction::East),
            (PieceKind::Mirror, Player::One, (3, 3), Direction::East),
        ]);
        let trace = simulate(&board, Player::One);
        let index = trace
            .events
            .iter()
            .position(|e| e.kind == LaserEventKind::Reflect)
            .unwrap();
        let reflect = trace.events[index];
        assert_eq!((reflect.x, reflect.y), (3, 3));
        assert_eq!(reflect.new_direction, Some(Direction::North));
        assert_eq!(reflect.new_direction.unwrap().vector(), (0, -1));
        let next = trace.events[index + 1];
        assert_eq!((next.x, next.y), (3, 2));
    }

    #[test]
    fn test_two_mirror_corner_returns_beam() {
        // East beam turns North at (3,5), then East again at (3,2).
        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (0, 5), Direction::East),
            (PieceKind::Mirror, Player::One, (3, 5), Direction::East),
            (PieceKind::Mirror, Player::One, (3, 2), Direction::West),
        ]);
        let trace = simulate(&board, Player::One);
        let reflections = trace
            .events
            .iter()
            .filter(|e| e.kind == LaserEventKind::Reflect)
            .map(|e| e.new_direction.unwrap())
            .collect::<Vec<_>>();
        assert_eq!(reflections, [Direction::North, Direction::East]);
        let exit = trace.events.last().unwrap();
        assert_eq!(exit.kind, LaserEventKind::Exit);
        assert_eq!((exit.x, exit.y), (10, 2));
    }

    #[test]
    fn test_mirror_hit_on_back_is_destroyed() {
        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (0, 3), Direction::East),
            (PieceKind::Mirror, Player::Two, (3, 3), Direction::West),
        ]);
        let trace = simulate(&board, Player::One);
        let destroyed = trace.destroyed_pieces();
        assert_eq!(destroyed.len(), 1);
        assert_eq!(destroyed[0].kind(), PieceKind::Mirror);
    }

    #[test]
    fn test_closed_cycle_terminates() {
        // Four DualMirrors form a loop the beam can never leave.
        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (3, 9), Direction::North),
            (PieceKind::DualMirror, Player::One, (5, 5), Direction::East),
            (PieceKind::DualMirror, Player::One, (5, 2), Direction::East),
            (PieceKind::DualMirror, Player::One, (2, 2), Direction::East),
            (PieceKind::DualMirror, Player::One, (2, 5), Direction::East),
            (PieceKind::Shield, Player::Two, (3, 5), Direction::East),
            (PieceKind::Mirror, Player::Two, (3, 2), Direction::North),
        ]);
        let trace = simulate(&board, Player::One);
        assert!(trace.capped);
        // START plus one event per iteration
        assert_eq!(trace.events.len(), LASER_ITERATION_LIMIT + 1);
        // the Shield and the Mirror are hit on every lap but reported once
        assert_eq!(trace.destroyed_pieces().len(), 2);
        assert!(trace.count(LaserEventKind::Destroy) > 2);
    }

    #[test]
    fn test_event_serialization() {
        let board = board_with(&[
            (PieceKind::Emitter, Player::One, (0, 3), Direction::East),
            (PieceKind::Mirror, Player::One, (1, 3), Direction::East),
        ]);
        let trace = simulate(&board, Player::One);
        let json = serde_json::to_value(&trace.events).unwrap();
        assert_eq!(json[0]["type"], "START");
        assert_eq!(json[1]["type"], "REFLECT");
        assert_eq!(json[1]["newDirection"], 270);
        assert_eq!(json[2]["type"], "PATH");
        assert!(json[2].get("piece").is_none());
        assert!(json[2].get("newDirection").is_none());
    }
}
