//! collision detection - walls, floor, ceiling, other blocks

use shaktris_core::bits::low_mask;
use shaktris_core::{Board, Piece};

/// does piece collide with anything? Off-board cells always collide.
#[inline(always)]
pub fn collides(board: &Board, piece: &Piece) -> bool {
    piece.cells().iter().any(|&(x, y)| {
        !Board::in_bounds(x, y) || board.get(x as usize, y as usize)
    })
}

/// can we place here? (just !collides)
#[inline(always)]
pub fn can_place(board: &Board, piece: &Piece) -> bool {
    !collides(board, piece)
}

/// collision check for the piece translated by (dx, dy)
#[inline]
pub fn collides_at(board: &Board, piece: &Piece, dx: i8, dy: i8) -> bool {
    let moved = Piece {
        x: piece.x + dx,
        y: piece.y + dy,
        ..*piece
    };
    collides(board, &moved)
}

/// Rows the piece can fall before resting. Scans each mino's column for the
/// highest filled cell below it. The piece must not collide already.
#[inline]
pub fn drop_distance(board: &Board, piece: &Piece) -> i8 {
    piece
        .cells()
        .iter()
        .map(|&(x, y)| {
            let below = board.column(x as usize) & low_mask(y as u32);
            if below == 0 {
                y
            } else {
                y - (32 - below.leading_zeros()) as i8
            }
        })
        .min()
        .unwrap_or(0)
}

/// y the piece lands at when dropped straight down
#[inline]
pub fn sonic_drop_y(board: &Board, piece: &Piece) -> i8 {
    piece.y - drop_distance(board, piece)
}

/// resting on the stack or the floor
#[inline]
pub fn is_grounded(board: &Board, piece: &Piece) -> bool {
    collides_at(board, piece, 0, -1)
}

/// no single-cell translation is possible; the all-spin condition
#[inline]
pub fn is_immobile(board: &Board, piece: &Piece) -> bool {
    collides_at(board, piece, -1, 0)
        && collides_at(board, piece, 1, 0)
        && collides_at(board, piece, 0, 1)
        && collides_at(board, piece, 0, -1)
}
