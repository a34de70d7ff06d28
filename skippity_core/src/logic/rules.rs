use crate::engine::Move;
use crate::logic::board::{Board, BoardCoordinate, PieceKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinates must be between 1 and {size}")]
    InvalidCoordinate { size: usize },
    #[error("coordinate is outside the board")]
    OutOfBounds,
    #[error("the selected cell is empty")]
    EmptySourceCell,
    #[error("the destination cell is occupied")]
    OccupiedDestination,
    #[error("a jump moves exactly two cells along one row or column")]
    IllegalJumpGeometry,
    #[error("there is no piece to jump over")]
    NoMidpointPiece,
    #[error("undo right already used this turn")]
    UndoRightExhausted,
    #[error("redo right already used this turn")]
    RedoRightExhausted,
    #[error("redo is only available after an undo")]
    RedoWithoutPriorUndo,
    #[error("no move to undo")]
    NothingToUndo,
    #[error("no move to redo")]
    NothingToRedo,
    #[error("a chained jump must start from {0}")]
    MustContinueFromLanding(BoardCoordinate),
    #[error("select a piece to move first")]
    NoSourceSelected,
    #[error("nothing to pass: capture a piece first")]
    NoChainPending,
    #[error("continue from the landing cell or pass first")]
    ChainPending,
    #[error("the game is over")]
    GameOver,
    #[error("no legal move available")]
    NoLegalMove,
}

/// Jump displacements, ordered so that destinations from a given source come
/// out in row-major order (up, left, right, down).
pub const JUMP_OFFSETS: [(isize, isize); 4] = [(-2, 0), (0, -2), (0, 2), (2, 0)];

/// Which jumps may follow a capture within the same turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChainRule {
    /// Any legal jump starting at the landing cell.
    #[default]
    AnyDirection,
    /// Only the jump continuing in the direction of the previous one.
    SameDirection,
}

impl ChainRule {
    /// Jumps available to continue a chain after `last` was played.
    #[must_use]
    pub fn continuations(self, board: &Board, last: &Move) -> Vec<Move> {
        match self {
            Self::AnyDirection => legal_jumps_from(board, last.to),
            Self::SameDirection => {
                let (dr, dc) = last.displacement();
                jump_by(board, last.to, dr, dc).into_iter().collect()
            }
        }
    }

    pub fn allows(self, last: &Move, next_from: BoardCoordinate, next_to: BoardCoordinate) -> bool {
        if next_from != last.to {
            return false;
        }
        match self {
            Self::AnyDirection => true,
            Self::SameDirection => {
                Move::displacement_between(next_from, next_to) == last.displacement()
            }
        }
    }
}

/// Validates a jump and returns the kind of piece it would capture.
///
/// Checks run in a fixed order: bounds, source, destination, geometry, midpoint.
pub fn validate_jump(
    board: &Board,
    from: BoardCoordinate,
    to: BoardCoordinate,
) -> Result<PieceKind, MoveError> {
    if !board.contains(from) || !board.contains(to) {
        return Err(MoveError::OutOfBounds);
    }
    if !board.is_occupied(from) {
        return Err(MoveError::EmptySourceCell);
    }
    if board.is_occupied(to) {
        return Err(MoveError::OccupiedDestination);
    }

    let d_row = from.row.abs_diff(to.row);
    let d_col = from.col.abs_diff(to.col);
    if !matches!((d_row, d_col), (2, 0) | (0, 2)) {
        return Err(MoveError::IllegalJumpGeometry);
    }

    board
        .get(from.midpoint(to))
        .ok_or(MoveError::NoMidpointPiece)
}

pub fn is_legal_jump(board: &Board, from: BoardCoordinate, to: BoardCoordinate) -> bool {
    validate_jump(board, from, to).is_ok()
}

/// The jump from `from` by `(dr, dc)`, if legal.
#[must_use]
pub fn jump_by(board: &Board, from: BoardCoordinate, dr: isize, dc: isize) -> Option<Move> {
    let to = from.offset(dr, dc, board.size())?;
    validate_jump(board, from, to)
        .ok()
        .map(|captured| Move::new(from, to, captured))
}

#[must_use]
pub fn legal_jumps_from(board: &Board, from: BoardCoordinate) -> Vec<Move> {
    JUMP_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| jump_by(board, from, dr, dc))
        .collect()
}

/// Appends every legal jump on the board to `moves`, sources in row-major
/// order and destinations per source in row-major order.
pub fn legal_jumps_into(board: &Board, moves: &mut Vec<Move>) {
    for from in board.coordinates() {
        if !board.is_occupied(from) {
            continue;
        }
        for &(dr, dc) in &JUMP_OFFSETS {
            if let Some(mv) = jump_by(board, from, dr, dc) {
                moves.push(mv);
            }
        }
    }
}

#[must_use]
pub fn legal_jumps(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    legal_jumps_into(board, &mut moves);
    moves
}

/// Whether any jump exists. Pieces belong to nobody, so the answer is the
/// same for both players.
pub fn has_any_legal_move(board: &Board) -> bool {
    board.coordinates().any(|from| {
        board.is_occupied(from)
            && JUMP_OFFSETS
                .iter()
                .any(|&(dr, dc)| jump_by(board, from, dr, dc).is_some())
    })
}

/// The game ends once neither player can jump. Depends only on occupancy.
pub fn is_terminal(board: &Board) -> bool {
    !has_any_legal_move(board)
}

/// Counts, over the whole board, each occupied cell that could jump right now,
/// once per available direction.
pub fn count_vulnerable(board: &Board) -> usize {
    board
        .coordinates()
        .filter(|&from| board.is_occupied(from))
        .map(|from| legal_jumps_from(board, from).len())
        .sum()
}
