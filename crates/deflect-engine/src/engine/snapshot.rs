use serde::{Deserialize, Serialize};

use crate::{
    BOARD_SIZE, Direction, MatchOutcome, MatchState, Piece, PieceId, PieceKind, Player, ShieldSides,
    SwapCooldowns,
};

/// Read-only view of a match for display and transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Rows of cells, indexed `board[y][x]`.
    pub board: Vec<Vec<Option<PieceView>>>,
    pub current_player: Player,
    pub turn_count: u32,
    pub game_over: bool,
    /// `None` while the match is running or when it ended in a draw.
    pub winner: Option<Player>,
    pub reserves: Reserves,
}

/// Mirrors left to place, keyed by player number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserves {
    #[serde(rename = "1")]
    pub one: u8,
    #[serde(rename = "2")]
    pub two: u8,
}

impl Reserves {
    #[must_use]
    pub fn get(self, player: Player) -> u8 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceView {
    pub id: PieceId,
    pub kind: PieceKind,
    pub owner: Player,
    pub x: usize,
    pub y: usize,
    pub facing: Direction,
    pub shield_sides: ShieldSides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldowns: Option<SwapCooldowns>,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id(),
            kind: piece.kind(),
            owner: piece.owner(),
            x: piece.position().x(),
            y: piece.position().y(),
            facing: piece.facing(),
            shield_sides: piece.shield_sides(),
            cooldowns: piece.cooldowns(),
        }
    }
}

impl Snapshot {
    /// Captures `state`; `outcome` is `Some` once the match has finished.
    #[must_use]
    pub fn capture(state: &MatchState, outcome: Option<MatchOutcome>) -> Self {
        let board = state.board();
        let mut rows = vec![vec![None; BOARD_SIZE]; BOARD_SIZE];
        for piece in board.pieces() {
            let view = PieceView::from(piece);
            rows[view.y][view.x] = Some(view);
        }
        let turns = state.turns();
        Self {
            board: rows,
            current_player: turns.current_player(),
            turn_count: turns.turn_count(),
            game_over: outcome.is_some(),
            winner: outcome.and_then(MatchOutcome::winner),
            reserves: Reserves {
                one: turns.reserve(Player::One),
                two: turns.reserve(Player::Two),
            },
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = &PieceView> + '_ {
        self.board.iter().flatten().flatten()
    }
}
