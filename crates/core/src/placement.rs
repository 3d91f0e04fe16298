//! Collision and placement - validating, committing and rotating pieces
//! against a board.
//!
//! Everything here is a pure function of its inputs.

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::types::{Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Offsets (dx, dy) tried in order when an in-place rotation collides.
pub const KICK_OFFSETS: [(i8, i8); 6] = [(1, 0), (-1, 0), (2, 0), (-2, 0), (1, -1), (-1, -1)];

/// Last resort after every kick fails: one row down.
pub const FLOOR_KICK: (i8, i8) = (0, 1);

/// Whether `piece` fits at `position`.
///
/// Cells above the board (negative rows) are allowed; cells left, right or
/// below the board, or on an occupied cell, are not.
pub fn can_place(board: &Board, piece: &Tetromino, position: Position) -> bool {
    piece.minos().iter().all(|&(dx, dy)| {
        let x = position.x + dx;
        let y = position.y + dy;
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !board.is_occupied(x, y)
    })
}

/// A copy of `board` with `piece` written in at `position`.
///
/// Cells above the board are dropped. No validity check: call
/// [`can_place`] first.
pub fn place(board: &Board, piece: &Tetromino, position: Position) -> Board {
    let mut out = board.clone();
    for (dx, dy) in piece.minos() {
        let y = position.y + dy;
        if y >= 0 {
            out.set(position.x + dx, y, Some(piece.kind));
        }
    }
    out
}

/// Rotate clockwise and resolve collisions with the kick search.
///
/// Tries the unchanged position, then each of [`KICK_OFFSETS`] in order,
/// then [`FLOOR_KICK`]. The first valid candidate wins. Returns `None` when
/// every candidate collides.
pub fn rotate_with_kicks(
    board: &Board,
    piece: &Tetromino,
    position: Position,
) -> Option<(Tetromino, Position)> {
    let rotated = piece.rotated();

    std::iter::once((0, 0))
        .chain(KICK_OFFSETS)
        .chain(std::iter::once(FLOOR_KICK))
        .map(|(dx, dy)| position.offset(dx, dy))
        .find(|&candidate| can_place(board, &rotated, candidate))
        .map(|candidate| (rotated, candidate))
}

/// Lowest position reachable by moving straight down from `position`.
///
/// Returns `position` itself when the piece cannot move down at all.
pub fn drop_position(board: &Board, piece: &Tetromino, position: Position) -> Position {
    let mut landed = position;
    while can_place(board, piece, landed.offset(0, 1)) {
        landed = landed.offset(0, 1);
    }
    landed
}
