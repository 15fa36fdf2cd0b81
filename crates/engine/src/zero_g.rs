//! Zero-gravity start states: everything a freshly spawned piece can reach on
//! an empty board using only shifts and kick rotations. Built once per piece
//! type on first use and shared by every generator.
//!
//! Every such state keeps its minos at or above `Board::LOW_ROW`, and every
//! kick it rejects is rejected by a wall. On a low board the same exploration
//! therefore plays out identically, so the table stands in for the top of the
//! search.

use std::collections::VecDeque;
use std::sync::OnceLock;

use shaktris_core::{Board, Piece, PieceType, Rotation, TurnDirection};
use tracing::debug;

use crate::traditional::StateSet;
use crate::movement::{shift, try_rotate};

pub struct ZeroGStarts {
    starts: Vec<Piece>,
    /// highest start row per [rotation][x]
    rows: [[Option<i8>; Board::WIDTH]; 4],
}

impl ZeroGStarts {
    fn build(kind: PieceType) -> Self {
        let board = Board::new();
        let spawn = Piece::new(kind);
        let mut visited = StateSet::new();
        let mut queue = VecDeque::new();
        let mut starts = Vec::new();
        let mut rows = [[None; Board::WIDTH]; 4];

        visited.insert(&spawn);
        queue.push_back(spawn);
        while let Some(piece) = queue.pop_front() {
            starts.push(piece);
            let slot = &mut rows[piece.rotation as usize][piece.x as usize];
            *slot = Some(slot.map_or(piece.y, |y: i8| y.max(piece.y)));

            let mut next = Vec::with_capacity(4);
            for dx in [-1, 1] {
                let mut p = piece;
                if shift(&board, &mut p, dx) {
                    next.push(p);
                }
            }
            if kind != PieceType::O {
                for dir in TurnDirection::BOTH {
                    if let Some(r) = try_rotate(&board, &piece, dir) {
                        next.push(r.piece);
                    }
                }
            }
            for p in next {
                if visited.insert(&p) {
                    queue.push_back(p);
                }
            }
        }

        debug!(piece = %kind, states = starts.len(), "built zero-g start table");
        Self { starts, rows }
    }

    pub fn starts(&self) -> &[Piece] {
        &self.starts
    }

    /// Highest zero-g row reached in this column, if the column is reached.
    #[inline]
    pub fn row(&self, rotation: Rotation, x: i8) -> Option<i8> {
        if !(0..Board::WIDTH as i8).contains(&x) {
            return None;
        }
        self.rows[rotation as usize][x as usize]
    }
}

static TABLES: OnceLock<[ZeroGStarts; 7]> = OnceLock::new();

pub fn zero_g_starts(kind: PieceType) -> &'static ZeroGStarts {
    let tables = TABLES.get_or_init(|| std::array::from_fn(|i| ZeroGStarts::build(PieceType::ALL[i])));
    &tables[kind as usize]
}
