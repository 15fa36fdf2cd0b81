//! Traditional move generation over explicit piece states.
//!
//! A BFS from spawn over shifts, drops and kick rotations, plus two shortcuts
//! for boards without holes: the sky path (low boards, one sonic drop per
//! zero-g start) and a column sweep (taller boards).

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use shaktris_core::{Board, Piece, PieceType, SpinType, TurnDirection};
use tracing::trace;

use crate::collision::{collides, is_grounded, is_immobile, sonic_drop_y};
use crate::kicks::kicks;
use crate::movement::{shift, soft_drop, sonic_drop, try_rotate};
use crate::zero_g::zero_g_starts;

const STATE_WORDS: usize = Piece::STATE_COUNT.div_ceil(64);

/// Dense visited set keyed by `Piece::compact_hash`.
pub(crate) struct StateSet {
    bits: [u64; STATE_WORDS],
}

impl StateSet {
    pub(crate) fn new() -> Self {
        Self {
            bits: [0; STATE_WORDS],
        }
    }

    /// Returns true if the state was not yet present.
    #[inline(always)]
    pub(crate) fn insert(&mut self, piece: &Piece) -> bool {
        let h = piece.compact_hash();
        let (word, bit) = (h / 64, 1u64 << (h % 64));
        let fresh = self.bits[word] & bit == 0;
        self.bits[word] |= bit;
        fresh
    }

    #[inline(always)]
    pub(crate) fn contains(&self, piece: &Piece) -> bool {
        if !Board::in_bounds(piece.x, piece.y) {
            return false;
        }
        let h = piece.compact_hash();
        self.bits[h / 64] & (1u64 << (h % 64)) != 0
    }
}

/// Generate all placements for a piece, picking the cheapest exact path for
/// the board shape. Empty when the spawn position is blocked.
pub fn movegen(board: &Board, kind: PieceType) -> Vec<Piece> {
    if collides(board, &Piece::new(kind)) {
        trace!(piece = %kind, "spawn blocked");
        return Vec::new();
    }
    if board.is_true_convex() {
        if board.is_low() {
            trace!(piece = %kind, "sky path");
            return sky_movegen(board, kind);
        }
        trace!(piece = %kind, "convex path");
        return convex_movegen(board, kind);
    }
    bfs_movegen(board, kind)
}

/// Full BFS. Seeded with the zero-g table on low boards.
pub fn bfs_movegen(board: &Board, kind: PieceType) -> Vec<Piece> {
    let spawn = Piece::new(kind);
    if collides(board, &spawn) {
        return Vec::new();
    }

    let mut visited = StateSet::new();
    let mut queue = VecDeque::with_capacity(256);
    if board.is_low() {
        for &start in zero_g_starts(kind).starts() {
            visited.insert(&start);
            queue.push_back(start);
        }
    } else {
        visited.insert(&spawn);
        queue.push_back(spawn);
    }

    let mut grounded = Vec::new();
    let mut next = Vec::with_capacity(6);
    while let Some(piece) = queue.pop_front() {
        if is_grounded(board, &piece) {
            grounded.push(piece);
        }

        next.clear();
        for dx in [-1, 1] {
            let mut p = piece;
            if shift(board, &mut p, dx) {
                next.push(p);
            }
        }
        let mut p = piece;
        if soft_drop(board, &mut p) {
            next.push(p);
        }
        let mut p = piece;
        if sonic_drop(board, &mut p) {
            next.push(p);
        }
        if kind != PieceType::O {
            for dir in TurnDirection::BOTH {
                if let Some(r) = try_rotate(board, &piece, dir) {
                    next.push(r.piece);
                }
            }
        }

        for &p in &next {
            if visited.insert(&p) {
                queue.push_back(p);
            }
        }
    }

    collect_placements(board, grounded, |p| visited.contains(p))
}

/// Low board without holes: drop every zero-g start once.
pub fn sky_movegen(board: &Board, kind: PieceType) -> Vec<Piece> {
    let table = zero_g_starts(kind);
    let placements = table.starts().iter().map(|&start| {
        let mut p = start;
        sonic_drop(board, &mut p);
        p
    });
    // below the zero-g row every free cell of a reached column is reachable;
    // sources above it only feed T landings too high to score a corner spin
    collect_placements(board, placements, |p| {
        table.row(p.rotation, p.x).is_some_and(|top| p.y <= top) && !collides(board, p)
    })
}

/// Board without holes: each (rotation, x) column's free anchors are one
/// interval from its landing row up, so a column is fully described by the
/// highest row reached in it. Sweep columns until no top row rises.
pub fn convex_movegen(board: &Board, kind: PieceType) -> Vec<Piece> {
    let spawn = Piece::new(kind);
    if collides(board, &spawn) {
        return Vec::new();
    }

    let mut columns = ColumnSweep::new(board);
    columns.raise(spawn);
    while let Some(piece) = columns.work.pop() {
        let (r, x) = (piece.rotation as usize, piece.x as usize);
        let (Some(top), floor) = (columns.top[r][x], columns.floor[r][x]) else {
            continue;
        };
        let high = Piece::at(kind, piece.rotation, piece.x, top);
        for dx in [-1, 1] {
            let mut p = high;
            if shift(board, &mut p, dx) {
                columns.raise(p);
            }
        }
        if kind == PieceType::O {
            continue;
        }
        for y in floor..=top {
            let p = Piece::at(kind, piece.rotation, piece.x, y);
            for dir in TurnDirection::BOTH {
                if let Some(r) = try_rotate(board, &p, dir) {
                    columns.raise(r.piece);
                }
            }
        }
    }

    let mut placements = Vec::new();
    for (r, tops) in columns.top.iter().enumerate() {
        for (x, top) in tops.iter().enumerate() {
            if top.is_some() {
                let rotation = shaktris_core::Rotation::from_index(r);
                placements.push(Piece::at(kind, rotation, x as i8, columns.floor[r][x]));
            }
        }
    }
    collect_placements(board, placements, |p| columns.reaches(p))
}

struct ColumnSweep<'a> {
    board: &'a Board,
    top: [[Option<i8>; Board::WIDTH]; 4],
    floor: [[i8; Board::WIDTH]; 4],
    work: Vec<Piece>,
}

impl<'a> ColumnSweep<'a> {
    fn new(board: &'a Board) -> Self {
        Self {
            board,
            top: [[None; Board::WIDTH]; 4],
            floor: [[0; Board::WIDTH]; 4],
            work: Vec::new(),
        }
    }

    fn raise(&mut self, piece: Piece) {
        let (r, x) = (piece.rotation as usize, piece.x as usize);
        match self.top[r][x] {
            Some(top) if top >= piece.y => {}
            current => {
                if current.is_none() {
                    self.floor[r][x] = sonic_drop_y(self.board, &piece);
                }
                self.top[r][x] = Some(piece.y);
                self.work.push(piece);
            }
        }
    }

    fn reaches(&self, piece: &Piece) -> bool {
        if !Board::in_bounds(piece.x, piece.y) {
            return false;
        }
        let (r, x) = (piece.rotation as usize, piece.x as usize);
        self.top[r][x].is_some_and(|top| (self.floor[r][x]..=top).contains(&piece.y))
    }
}

/// Spin of a resting piece: immobile pieces count as full spins; otherwise a
/// T takes the best corner result over every rotation from a reachable state
/// that lands exactly here.
pub fn classify_spin(board: &Board, placement: &Piece, reachable: impl Fn(&Piece) -> bool) -> SpinType {
    if is_immobile(board, placement) {
        return SpinType::Normal;
    }
    if placement.kind != PieceType::T {
        return SpinType::None;
    }
    let mut best = SpinType::None;
    for dir in TurnDirection::BOTH {
        let from = placement.rotation.turn(dir.opposite());
        for &(dx, dy) in kicks(placement.kind, from, dir) {
            let source = Piece::at(placement.kind, from, placement.x - dx, placement.y - dy);
            if !reachable(&source) {
                continue;
            }
            if let Some(r) = try_rotate(board, &source, dir) {
                if r.piece.x == placement.x && r.piece.y == placement.y {
                    best = best.max(r.piece.spin);
                }
            }
        }
    }
    best
}

/// Attach spins, fold duplicates onto canonical rotations and sort.
fn collect_placements(
    board: &Board,
    placements: impl IntoIterator<Item = Piece>,
    reachable: impl Fn(&Piece) -> bool,
) -> Vec<Piece> {
    let mut merged: FxHashMap<(u8, i8, i8), Piece> = FxHashMap::default();
    for p in placements {
        let spin = classify_spin(board, &p, &reachable);
        let canonical = p.with_spin(spin).canonical();
        merged
            .entry(canonical.sort_key())
            .and_modify(|e| e.spin = e.spin.max(canonical.spin))
            .or_insert(canonical);
    }
    let mut out: Vec<Piece> = merged.into_values().collect();
    out.sort_by_key(Piece::sort_key);
    out
}
