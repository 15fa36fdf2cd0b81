//! perft - leaf counts of the placement tree for a fixed queue, no hold.
//! Each placement is locked and its lines cleared before recursing.

use rayon::prelude::*;
use shaktris_core::{Board, Piece, PieceType};
use tracing::debug;

use crate::movegen;

#[inline]
fn play(board: &Board, piece: &Piece) -> Board {
    let mut next = *board;
    next.set_piece(piece);
    next.clear_lines();
    next
}

pub fn perft(board: &Board, queue: &[PieceType], depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let Some((&kind, rest)) = queue.split_first() else {
        return 1;
    };
    let placements = movegen(board, kind);
    if depth == 1 {
        return placements.len() as u64;
    }
    placements
        .iter()
        .map(|p| perft(&play(board, p), rest, depth - 1))
        .sum()
}

/// Parallel perft - splits the first ply across the rayon pool
pub fn perft_parallel(board: &Board, queue: &[PieceType], depth: u32) -> u64 {
    if depth <= 1 {
        return perft(board, queue, depth);
    }
    let Some((&kind, rest)) = queue.split_first() else {
        return 1;
    };
    let placements = movegen(board, kind);
    debug!(piece = %kind, roots = placements.len(), depth, "perft split");
    placements
        .par_iter()
        .map(|p| perft(&play(board, p), rest, depth - 1))
        .sum()
}
