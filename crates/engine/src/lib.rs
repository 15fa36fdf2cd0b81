//! shaktris-engine - SRS movement, placement generation and scoring.
//!
//! Two generators produce identical placement lists: `traditional` walks
//! explicit piece states, `movegen_smeared` advances whole bitboards of
//! anchors at once and is the default.

pub mod bag;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod kicks;
pub mod modes;
pub mod movegen_smeared;
pub mod movement;
pub mod perft;
pub mod smear;
pub mod traditional;
pub mod zero_g;

pub use bag::SevenBag;
pub use collision::{can_place, collides, is_grounded, sonic_drop_y};
pub use config::{ModeKind, TetrioS1Options};
pub use error::GameError;
pub use game::{Game, TurnOutcome, QUEUE_SIZE};
pub use kicks::kicks;
pub use modes::{Botris, Mode, ScoringMode, TetrioS1};
pub use movement::{kick_rotate, process_movement, try_rotate, RotationResult};
pub use smear::SmearedBoard;

use shaktris_core::{Board, Piece, PieceType};

/// Every placement of `kind` on `board`, canonical and sorted by
/// (rotation, x, y). Empty when the spawn position is blocked.
#[inline]
pub fn movegen(board: &Board, kind: PieceType) -> Vec<Piece> {
    movegen_smeared::movegen(board, kind)
}
