//! shaktris-core - board, piece and move types shared by the engine.

pub mod bits;
mod board;
mod error;
mod moves;
mod piece;

pub use board::Board;
pub use error::ParseError;
pub use moves::{Movement, SpinType, TurnDirection};
pub use piece::{canonical_shift, Piece, PieceType, Rotation};
