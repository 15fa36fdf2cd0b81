//! Rotation and movement logic with kick application.

use crate::collision::{can_place, collides_at, drop_distance, is_immobile};
use crate::kicks::kicks;
use shaktris_core::{Board, Movement, Piece, PieceType, SpinType, TurnDirection};

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub piece: Piece,
    pub kick_index: usize,
}

/// T corners per rotation: [front, front, back, back] relative to the anchor.
pub const T_CORNERS: [[(i8, i8); 4]; 4] = [
    [(-1, 1), (1, 1), (1, -1), (-1, -1)],
    [(1, 1), (1, -1), (-1, -1), (-1, 1)],
    [(1, -1), (-1, -1), (-1, 1), (1, 1)],
    [(-1, -1), (-1, 1), (1, 1), (1, -1)],
];

/// 4-corner T-spin rule on a T that just rotated into place.
/// Walls and floor count as filled corners.
pub fn t_spin(board: &Board, piece: &Piece, kick_index: usize) -> SpinType {
    let [a, b, c, d] = T_CORNERS[piece.rotation as usize]
        .map(|(dx, dy)| board.filled(piece.x + dx, piece.y + dy));

    if a && b && (c || d) {
        SpinType::Normal
    } else if (a || b) && c && d {
        // the last kick upgrades a mini
        if kick_index == 4 {
            SpinType::Normal
        } else {
            SpinType::Mini
        }
    } else {
        SpinType::None
    }
}

/// Try to rotate a piece, applying kicks in order.
/// Returns None if every kick collides.
pub fn try_rotate(board: &Board, piece: &Piece, dir: TurnDirection) -> Option<RotationResult> {
    let to = piece.rotation.turn(dir);
    for (i, &(dx, dy)) in kicks(piece.kind, piece.rotation, dir).iter().enumerate() {
        let mut candidate = Piece::at(piece.kind, to, piece.x + dx, piece.y + dy);
        if can_place(board, &candidate) {
            if piece.kind == PieceType::T {
                candidate.spin = t_spin(board, &candidate, i);
            }
            return Some(RotationResult {
                piece: candidate,
                kick_index: i,
            });
        }
    }
    None
}

/// In-place rotation; the piece is left untouched when no kick fits.
pub fn kick_rotate(board: &Board, piece: &mut Piece, dir: TurnDirection) -> bool {
    match try_rotate(board, piece, dir) {
        Some(result) => {
            *piece = result.piece;
            true
        }
        None => false,
    }
}

/// Horizontal move by dx. Clears the spin on success.
pub fn shift(board: &Board, piece: &mut Piece, dx: i8) -> bool {
    if collides_at(board, piece, dx, 0) {
        return false;
    }
    piece.x += dx;
    piece.spin = SpinType::None;
    true
}

/// Move down one row.
pub fn soft_drop(board: &Board, piece: &mut Piece) -> bool {
    if collides_at(board, piece, 0, -1) {
        return false;
    }
    piece.y -= 1;
    piece.spin = SpinType::None;
    true
}

/// Drop to the resting row. Returns whether the piece moved.
pub fn sonic_drop(board: &Board, piece: &mut Piece) -> bool {
    let distance = drop_distance(board, piece);
    if distance == 0 {
        return false;
    }
    piece.y -= distance;
    piece.spin = SpinType::None;
    true
}

/// Apply one player input. Rotations that leave the piece immobile count as
/// a full spin for every piece type.
pub fn process_movement(board: &Board, piece: &mut Piece, movement: Movement) -> bool {
    match movement {
        Movement::Left => shift(board, piece, -1),
        Movement::Right => shift(board, piece, 1),
        Movement::SoftDrop => soft_drop(board, piece),
        Movement::SonicDrop => sonic_drop(board, piece),
        Movement::RotateClockwise | Movement::RotateCounterClockwise => {
            let dir = if movement == Movement::RotateClockwise {
                TurnDirection::Right
            } else {
                TurnDirection::Left
            };
            let rotated = kick_rotate(board, piece, dir);
            if rotated && is_immobile(board, piece) {
                piece.spin = SpinType::Normal;
            }
            rotated
        }
    }
}
