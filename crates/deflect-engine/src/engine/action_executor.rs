use crate::{
    Action, ActionError, ActionKind, ActionOutcome, Cell, Direction, MatchState, Piece, PieceKind,
    Player, Position, SWAP_COOLDOWN, SwapTarget,
};

/// Validates `action` against `state` and applies it.
///
/// Every rule is checked before anything is mutated, so on `Err` the state is
/// exactly as it was. The laser is not fired and the turn is not ended here.
pub fn execute_action(
    state: &mut MatchState,
    action: &Action,
) -> Result<ActionOutcome, ActionError> {
    let current = state.current_player();
    if action.player != current {
        return Err(ActionError::NotYourTurn {
            player: action.player,
        });
    }

    let outcome = match action.kind {
        ActionKind::Rotate { at, clockwise } => rotate(state, action.player, at, clockwise)?,
        ActionKind::Move { from, to } => move_piece(state, action.player, from, to)?,
        ActionKind::Place { at, facing } => place_mirror(state, action.player, at, facing)?,
        ActionKind::Swap { from, to } => swap(state, action.player, from, to)?,
    };
    tracing::debug!(%action, message = %outcome.message, "action applied");
    Ok(outcome)
}

fn position(cell: Cell) -> Result<Position, ActionError> {
    Position::try_new(cell.x, cell.y).ok_or(ActionError::OutOfBounds {
        x: cell.x,
        y: cell.y,
    })
}

/// The acting player's own piece at `cell`.
fn own_piece_at(state: &MatchState, player: Player, cell: Cell) -> Result<Piece, ActionError> {
    let position = position(cell)?;
    let piece = state
        .board()
        .piece_at(position)
        .ok_or(ActionError::NoPieceAt { position })?;
    if piece.owner() != player {
        return Err(ActionError::NotOwnPiece { position });
    }
    Ok(*piece)
}

fn rotate(
    state: &mut MatchState,
    player: Player,
    at: Cell,
    clockwise: bool,
) -> Result<ActionOutcome, ActionError> {
    let piece = own_piece_at(state, player, at)?;
    if piece.kind() == PieceKind::Royal {
        return Err(ActionError::RoyalCannotRotate);
    }
    if !piece.can_rotate() {
        return Err(ActionError::CannotRotate { kind: piece.kind() });
    }

    let facing = if clockwise {
        piece.facing().rotated_clockwise()
    } else {
        piece.facing().rotated_counterclockwise()
    };
    state.board_mut().set_facing(piece.id(), facing)?;

    let sense = if clockwise {
        "clockwise"
    } else {
        "counterclockwise"
    };
    Ok(ActionOutcome {
        message: format!("rotated {} {sense}", piece.kind()),
        skip_laser: false,
    })
}

fn move_piece(
    state: &mut MatchState,
    player: Player,
    from: Cell,
    to: Cell,
) -> Result<ActionOutcome, ActionError> {
    let piece = own_piece_at(state, player, from)?;
    if !piece.can_move() {
        return Err(ActionError::CannotMove { kind: piece.kind() });
    }
    let to = position(to)?;
    if !state.board().is_empty_at(to) {
        return Err(ActionError::CellOccupied { position: to });
    }
    if !piece.position().is_orthogonally_adjacent(to) {
        return Err(ActionError::NotAdjacent {
            from: piece.position(),
            to,
        });
    }

    let target = Cell::from(to);
    state.board_mut().move_piece(piece.id(), target.x, target.y)?;
    Ok(ActionOutcome {
        message: format!("moved {} to {to}", piece.kind()),
        skip_laser: false,
    })
}

fn place_mirror(
    state: &mut MatchState,
    player: Player,
    at: Cell,
    facing: Direction,
) -> Result<ActionOutcome, ActionError> {
    if state.turns().reserve(player) == 0 {
        return Err(ActionError::EmptyReserve { player });
    }
    let at = position(at)?;
    if !state.board().is_empty_at(at) {
        return Err(ActionError::CellOccupied { position: at });
    }
    if state.is_protected_perimeter(at) {
        return Err(ActionError::ProtectedPerimeter { position: at });
    }

    state
        .board_mut()
        .add_piece(PieceKind::Mirror, player, at, facing)?;
    state.turns_mut().decrement_reserve(player);
    Ok(ActionOutcome {
        message: format!("placed mirror at {at}"),
        skip_laser: false,
    })
}

fn swap(
    state: &mut MatchState,
    player: Player,
    from: Cell,
    to: Cell,
) -> Result<ActionOutcome, ActionError> {
    let dual = own_piece_at(state, player, from)?;
    let Some(cooldowns) = dual.cooldowns() else {
        return Err(ActionError::NotDualMirror {
            position: dual.position(),
        });
    };

    let to = position(to)?;
    let target_piece = state
        .board()
        .piece_at(to)
        .ok_or(ActionError::NoPieceAt { position: to })?;
    let target = SwapTarget::from_kind(target_piece.kind())
        .filter(|_| target_piece.owner() == dual.owner())
        .ok_or(ActionError::InvalidSwapTarget { position: to })?;
    let remaining = cooldowns.get(target);
    if remaining > 0 {
        return Err(ActionError::CooldownActive { target, remaining });
    }

    let target_id = target_piece.id();
    let board = state.board_mut();
    board.swap_positions(dual.id(), target_id)?;
    if let Some(cooldowns) = board.piece_mut(dual.id())?.cooldowns_mut() {
        cooldowns.set(target, SWAP_COOLDOWN);
    }

    Ok(ActionOutcome {
        message: format!("swapped dual mirror with {target}"),
        skip_laser: target == SwapTarget::Emitter,
    })
}
