//! Bitboard move generation over smeared boards.
//! All 10 columns x 4 rotations advance together: shift, kick and drop
//! closures repeat until the reach set stops growing, then resting anchors are
//! read off, classified and folded onto canonical rotations.

use shaktris_core::bits::low_mask;
use shaktris_core::{canonical_shift, Board, Piece, PieceType, Rotation, SpinType, TurnDirection};
use tracing::trace;

use crate::smear::{shift_rows, Layers, SmearedBoard, EMPTY_LAYERS};
use crate::zero_g::zero_g_starts;

/// Generate all placements. Boards that are low and convex for this piece
/// skip the flood fill entirely.
pub fn movegen(board: &Board, kind: PieceType) -> Vec<Piece> {
    let smeared = SmearedBoard::smear(board, kind);
    if smeared.collides(&Piece::new(kind)) {
        trace!(piece = %kind, "spawn blocked");
        return Vec::new();
    }
    let reach = if !smeared.is_convex() {
        flood_fill(&smeared, &seed(board, &smeared))
    } else if board.is_low() {
        trace!(piece = %kind, "convex fast path");
        convex_reach(&smeared)
    } else {
        trace!(piece = %kind, "convex sweep");
        convex_sweep(&smeared, &seed(board, &smeared))
    };
    extract(&smeared, &reach)
}

/// The general path on any board.
pub fn flood_fill_movegen(board: &Board, kind: PieceType) -> Vec<Piece> {
    let smeared = SmearedBoard::smear(board, kind);
    if smeared.collides(&Piece::new(kind)) {
        return Vec::new();
    }
    let reach = flood_fill(&smeared, &seed(board, &smeared));
    extract(&smeared, &reach)
}

/// Spawn, or on low boards the whole zero-g table.
fn seed(board: &Board, smeared: &SmearedBoard) -> Layers {
    let mut reach = EMPTY_LAYERS;
    let mut mark = |p: &Piece| reach[p.rotation as usize][p.x as usize] |= 1 << p.y;
    if board.is_low() {
        zero_g_starts(smeared.kind()).starts().iter().for_each(&mut mark);
    } else {
        mark(&Piece::new(smeared.kind()));
    }
    reach
}

/// Every anchor reachable from `seed` by shifts, kick rotations and drops.
pub fn flood_fill(smeared: &SmearedBoard, seed: &Layers) -> Layers {
    let mut reach = *seed;
    smeared.non_collides(&mut reach);
    let mut passes = 0;
    loop {
        let before = reach;
        smeared.shift(&mut reach);
        let turned = smeared.rotate_srs(&reach);
        for (layer, add) in reach.iter_mut().zip(turned.iter()) {
            for (col, bits) in layer.iter_mut().zip(add.iter()) {
                *col |= bits;
            }
        }
        smeared.smear_drop(&mut reach);
        passes += 1;
        if reach == before {
            break;
        }
    }
    trace!(piece = %smeared.kind(), passes, "flood fill converged");
    reach
}

/// On a low convex board each zero-g column is reachable from its landing
/// row up to its zero-g row.
fn convex_reach(smeared: &SmearedBoard) -> Layers {
    let table = zero_g_starts(smeared.kind());
    let mut reach = EMPTY_LAYERS;
    for &rotation in smeared.rotations() {
        let r = rotation as usize;
        for x in 0..Board::WIDTH {
            if let Some(top) = table.row(rotation, x as i8) {
                reach[r][x] = smeared.free(r, x as i8) & low_mask(top as u32 + 1);
            }
        }
    }
    reach
}

/// Flood fill for convex boards. Every column's free anchors are one interval
/// from its landing row up, so dropping is a mask below the highest reached
/// row. Repeats until no column's top row rises.
pub fn convex_sweep(smeared: &SmearedBoard, seed: &Layers) -> Layers {
    let mut reach = *seed;
    smeared.non_collides(&mut reach);
    drop_to_floor(smeared, &mut reach);
    let mut passes = 0;
    loop {
        let before = reach;
        smeared.shift(&mut reach);
        let turned = smeared.rotate_srs(&reach);
        for (layer, add) in reach.iter_mut().zip(turned.iter()) {
            for (col, bits) in layer.iter_mut().zip(add.iter()) {
                *col |= bits;
            }
        }
        drop_to_floor(smeared, &mut reach);
        passes += 1;
        if reach == before {
            break;
        }
    }
    trace!(piece = %smeared.kind(), passes, "convex sweep converged");
    reach
}

/// Widen each reached column to every free anchor at or below its top row.
fn drop_to_floor(smeared: &SmearedBoard, reach: &mut Layers) {
    for &rotation in smeared.rotations() {
        let r = rotation as usize;
        for x in 0..Board::WIDTH {
            let bits = reach[r][x];
            if bits != 0 {
                let top = 31 - bits.leading_zeros();
                reach[r][x] = smeared.free(r, x as i8) & low_mask(top + 1);
            }
        }
    }
}

/// Resting anchors with their spins, canonical and sorted by (rotation, x, y).
fn extract(smeared: &SmearedBoard, reach: &Layers) -> Vec<Piece> {
    let kind = smeared.kind();
    let mut grounded = EMPTY_LAYERS;
    let mut normal = EMPTY_LAYERS;
    let mut mini = EMPTY_LAYERS;
    for r in 0..4 {
        for x in 0..Board::WIDTH {
            let bits = reach[r][x];
            grounded[r][x] = bits & !(bits << 1);
            normal[r][x] = grounded[r][x] & smeared.immobile(r, x);
        }
    }
    if kind == PieceType::T {
        t_spins(smeared, reach, &grounded, &mut normal, &mut mini);
    }

    let mut out_grounded = EMPTY_LAYERS;
    let mut out_normal = EMPTY_LAYERS;
    let mut out_mini = EMPTY_LAYERS;
    for (r, rotation) in Rotation::ALL.into_iter().enumerate() {
        let (canonical, dx, dy) = canonical_shift(kind, rotation);
        let cr = canonical as usize;
        for x in 0..Board::WIDTH {
            if grounded[r][x] == 0 {
                continue;
            }
            let cx = (x as i8 + dx) as usize;
            out_grounded[cr][cx] |= shift_rows(grounded[r][x], dy);
            out_normal[cr][cx] |= shift_rows(normal[r][x], dy);
            out_mini[cr][cx] |= shift_rows(mini[r][x], dy);
        }
    }

    let mut placements = Vec::new();
    for (r, rotation) in Rotation::ALL.into_iter().enumerate() {
        for x in 0..Board::WIDTH {
            let mut bits = out_grounded[r][x];
            while bits != 0 {
                let y = bits.trailing_zeros();
                let bit = 1 << y;
                let spin = if out_normal[r][x] & bit != 0 {
                    SpinType::Normal
                } else if out_mini[r][x] & bit != 0 {
                    SpinType::Mini
                } else {
                    SpinType::None
                };
                placements.push(Piece::at(kind, rotation, x as i8, y as i8).with_spin(spin));
                bits &= bits - 1;
            }
        }
    }
    placements
}

/// Corner classification of every kick landing on a resting anchor.
fn t_spins(smeared: &SmearedBoard, reach: &Layers, grounded: &Layers, normal: &mut Layers, mini: &mut Layers) {
    for from in Rotation::ALL {
        for dir in TurnDirection::BOTH {
            smeared.rotate_cascade(reach, from, dir, |to, x, kick, bits| {
                let landed = bits & grounded[to][x];
                if landed == 0 {
                    return;
                }
                let [a, b, c, d] = smeared.t_corners(to, x);
                let front = a & b & (c | d);
                let back = (a | b) & c & d;
                normal[to][x] |= landed & front;
                if kick == 4 {
                    normal[to][x] |= landed & back;
                } else {
                    mini[to][x] |= landed & back & !front;
                }
            });
        }
    }
}
