use shaktris_core::{Piece, PieceType};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("no current piece, the queue is exhausted")]
    NoCurrentPiece,
    #[error("{0:?} overlaps the board")]
    Collision(Piece),
    #[error("{0} is neither the current piece nor the hold piece")]
    NotPlayable(PieceType),
    #[error("queue is full")]
    QueueFull,
}
