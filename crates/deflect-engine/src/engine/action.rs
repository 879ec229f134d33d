use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ActionError, Cell, Direction, Player};

/// A player's request for one turn.
///
/// Serialized flat, with the action kind in a `type` field:
///
/// ```json
/// {"player": 1, "type": "move", "from": {"x": 3, "y": 4}, "to": {"x": 3, "y": 5}}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub player: Player,
    #[serde(flatten)]
    pub kind: ActionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionKind {
    /// Turn the piece at `at` by 90°.
    Rotate { at: Cell, clockwise: bool },
    /// Step the piece at `from` to the orthogonally adjacent cell `to`.
    Move { from: Cell, to: Cell },
    /// Put a Mirror from the reserve on `at`.
    Place { at: Cell, facing: Direction },
    /// Exchange the DualMirror at `from` with its owner's Emitter or Royal at `to`.
    Swap { from: Cell, to: Cell },
}

impl Action {
    #[must_use]
    pub fn rotate(player: Player, at: impl Into<Cell>, clockwise: bool) -> Self {
        Self {
            player,
            kind: ActionKind::Rotate {
                at: at.into(),
                clockwise,
            },
        }
    }

    #[must_use]
    pub fn move_piece(player: Player, from: impl Into<Cell>, to: impl Into<Cell>) -> Self {
        Self {
            player,
            kind: ActionKind::Move {
                from: from.into(),
                to: to.into(),
            },
        }
    }

    #[must_use]
    pub fn place(player: Player, at: impl Into<Cell>, facing: Direction) -> Self {
        Self {
            player,
            kind: ActionKind::Place {
                at: at.into(),
                facing,
            },
        }
    }

    #[must_use]
    pub fn swap(player: Player, from: impl Into<Cell>, to: impl Into<Cell>) -> Self {
        Self {
            player,
            kind: ActionKind::Swap {
                from: from.into(),
                to: to.into(),
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.player)?;
        match self.kind {
            ActionKind::Rotate { at, clockwise } => {
                let sense = if clockwise {
                    "clockwise"
                } else {
                    "counterclockwise"
                };
                write!(f, "rotate {at} {sense}")
            }
            ActionKind::Move { from, to } => write!(f, "move {from} -> {to}"),
            ActionKind::Place { at, facing } => write!(f, "place mirror at {at} facing {facing}"),
            ActionKind::Swap { from, to } => write!(f, "swap {from} <-> {to}"),
        }
    }
}

/// Successful application of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub message: String,
    /// The acting player's laser does not fire this turn.
    pub skip_laser: bool,
}

/// Wire shape of an action's acceptance or rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_laser: Option<bool>,
}

impl From<&Result<ActionOutcome, ActionError>> for ActionResult {
    fn from(result: &Result<ActionOutcome, ActionError>) -> Self {
        match result {
            Ok(outcome) => Self {
                success: true,
                error: None,
                message: Some(outcome.message.clone()),
                skip_laser: outcome.skip_laser.then_some(true),
            },
            Err(error) => Self {
                success: false,
                error: Some(error.to_string()),
                message: None,
                skip_laser: None,
            },
        }
    }
}
