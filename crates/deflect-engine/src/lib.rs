pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Violation of a board-level invariant.
///
/// These are never caused by a legal player mistake: the action executor
/// validates every rule before touching the board, so a `BoardError` reaching
/// a caller means an internal contract was broken upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("cell ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },
    #[display("cell {position} is already occupied")]
    CellOccupied { position: Position },
    #[display("unknown piece {id}")]
    UnknownPiece { id: PieceId },
}

/// Rule violation reported for a rejected action.
///
/// Every variant is returned before any state is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("game is over")]
    GameOver,
    #[display("not {player}'s turn")]
    NotYourTurn { player: Player },
    #[display("cell ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },
    #[display("no piece at {position}")]
    NoPieceAt { position: Position },
    #[display("piece at {position} belongs to the opponent")]
    NotOwnPiece { position: Position },
    #[display("royal cannot rotate")]
    RoyalCannotRotate,
    #[display("{kind} cannot rotate")]
    CannotRotate { kind: PieceKind },
    #[display("{kind} cannot move")]
    CannotMove { kind: PieceKind },
    #[display("cell {position} is occupied")]
    CellOccupied { position: Position },
    #[display("must move to an orthogonally adjacent cell ({from} -> {to})")]
    NotAdjacent { from: Position, to: Position },
    #[display("{player} has no mirrors in reserve")]
    EmptyReserve { player: Player },
    #[display("cannot place at {position}: adjacent to an emitter or royal")]
    ProtectedPerimeter { position: Position },
    #[display("piece at {position} is not a dual mirror")]
    NotDualMirror { position: Position },
    #[display("piece at {position} is not a swappable emitter or royal of the same owner")]
    InvalidSwapTarget { position: Position },
    #[display("swap with {target} on cooldown ({remaining} turns remaining)")]
    CooldownActive { target: SwapTarget, remaining: u8 },
    #[display("internal board error: {_0}")]
    Internal(BoardError),
}

impl From<BoardError> for ActionError {
    fn from(error: BoardError) -> Self {
        ActionError::Internal(error)
    }
}
