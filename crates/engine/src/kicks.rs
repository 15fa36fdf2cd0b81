//! SRS kick tables, stored as per-rotation offsets.
//! Kick i from rotation a to b translates the piece by offset[a][i] - offset[b][i].

use shaktris_core::{PieceType, Rotation, TurnDirection};

pub const KICK_COUNT: usize = 5;

type OffsetTable = [[(i8, i8); KICK_COUNT]; 4];

const JLSTZ_OFFSETS: OffsetTable = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const O_OFFSETS: OffsetTable = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, -1), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(-1, -1), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
];

const I_OFFSETS: OffsetTable = [
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

const fn offsets_for(kind: PieceType) -> OffsetTable {
    match kind {
        PieceType::O => O_OFFSETS,
        PieceType::I => I_OFFSETS,
        _ => JLSTZ_OFFSETS,
    }
}

/// KICK_TABLE[type][from][dir] with dir 0 = left (ccw), 1 = right (cw).
const KICK_TABLE: [[[[(i8, i8); KICK_COUNT]; 2]; 4]; 7] = {
    let mut table = [[[[(0i8, 0i8); KICK_COUNT]; 2]; 4]; 7];
    let mut kind = 0;
    while kind < 7 {
        let offsets = offsets_for(PieceType::ALL[kind]);
        let mut from = 0;
        while from < 4 {
            let mut dir = 0;
            while dir < 2 {
                let to = if dir == 0 { (from + 3) % 4 } else { (from + 1) % 4 };
                let mut i = 0;
                while i < KICK_COUNT {
                    let (ax, ay) = offsets[from][i];
                    let (bx, by) = offsets[to][i];
                    table[kind][from][dir][i] = (ax - bx, ay - by);
                    i += 1;
                }
                dir += 1;
            }
            from += 1;
        }
        kind += 1;
    }
    table
};

/// Translations to try, in order, when turning `from` in `dir`.
#[inline(always)]
pub fn kicks(kind: PieceType, from: Rotation, dir: TurnDirection) -> &'static [(i8, i8); KICK_COUNT] {
    let d = match dir {
        TurnDirection::Left => 0,
        TurnDirection::Right => 1,
    };
    &KICK_TABLE[kind as usize][from as usize][d]
}
