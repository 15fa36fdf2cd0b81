//! Smeared boards - per-rotation collision bitboards over anchor positions
//! bit y of column x in rotation r is set when anchoring the piece at (x, y)
//! in r would hit the stack, a wall, the floor or the ceiling

use shaktris_core::bits::low_mask;
use shaktris_core::{Board, Piece, PieceType, Rotation, TurnDirection};

use crate::kicks::kicks;
use crate::movement::T_CORNERS;

/// Anchor bitboards for all four rotations: [rotation][x] -> rows.
pub type Layers = [[u32; Board::WIDTH]; 4];

pub const EMPTY_LAYERS: Layers = [[0; Board::WIDTH]; 4];

/// Move a row bitmap up (dy > 0) or down (dy < 0); bits leaving the board drop.
#[inline(always)]
pub fn shift_rows(bits: u32, dy: i8) -> u32 {
    if dy >= 0 {
        bits << dy as u32
    } else {
        bits >> (-dy) as u32
    }
}

/// Occluded fill toward row 0: every row reachable from a seed by moving
/// down through free rows.
#[inline(always)]
pub fn fill_down(seed: u32, free: u32) -> u32 {
    let mut gen = seed;
    let mut pro = free;
    gen |= pro & (gen >> 1);
    pro &= pro >> 1;
    gen |= pro & (gen >> 2);
    pro &= pro >> 2;
    gen |= pro & (gen >> 4);
    pro &= pro >> 4;
    gen |= pro & (gen >> 8);
    pro &= pro >> 8;
    gen |= pro & (gen >> 16);
    gen
}

#[derive(Clone, Debug)]
pub struct SmearedBoard {
    kind: PieceType,
    board: Board,
    layers: [Board; 4],
}

impl SmearedBoard {
    /// Build the four collision layers for one piece type.
    pub fn smear(board: &Board, kind: PieceType) -> Self {
        let mut layers = [Board::new(); 4];
        for rotation in Rotation::ALL {
            let minos = kind.minos(rotation);
            let layer = &mut layers[rotation as usize];
            for x in 0..Board::WIDTH {
                let mut blocked = 0u32;
                for &(dx, dy) in &minos {
                    let sx = x as i8 + dx;
                    if !(0..Board::WIDTH as i8).contains(&sx) {
                        blocked = u32::MAX;
                        break;
                    }
                    let col = board.column(sx as usize);
                    blocked |= if dy >= 0 {
                        // anchors whose mino would sit above row 31
                        (col >> dy as u32) | !(u32::MAX >> dy as u32)
                    } else {
                        let n = (-dy) as u32;
                        (col << n) | low_mask(n)
                    };
                }
                layer.set_column(x, blocked);
            }
        }
        Self {
            kind,
            board: *board,
            layers,
        }
    }

    #[inline(always)]
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    /// Rotations the search needs: O rotates onto its own footprint.
    pub fn rotations(&self) -> &'static [Rotation] {
        if self.kind == PieceType::O {
            &[Rotation::North]
        } else {
            &Rotation::ALL
        }
    }

    #[inline(always)]
    pub fn blocked(&self, r: usize, x: i8) -> u32 {
        if (0..Board::WIDTH as i8).contains(&x) {
            self.layers[r].column(x as usize)
        } else {
            u32::MAX
        }
    }

    #[inline(always)]
    pub fn free(&self, r: usize, x: i8) -> u32 {
        !self.blocked(r, x)
    }

    pub fn collides(&self, piece: &Piece) -> bool {
        if !(0..Board::HEIGHT as i8).contains(&piece.y) {
            return true;
        }
        self.blocked(piece.rotation as usize, piece.x) >> piece.y & 1 == 1
    }

    /// Below the ceiling, every column's blocked anchors form one run from
    /// row 0, so the free anchors are a single interval.
    pub fn is_convex(&self) -> bool {
        Rotation::ALL.iter().all(|&rotation| {
            let top_dy = self
                .kind
                .minos(rotation)
                .iter()
                .map(|&(_, dy)| dy)
                .max()
                .unwrap_or(0)
                .max(0);
            let below_ceiling = u32::MAX >> top_dy as u32;
            self.layers[rotation as usize].columns().iter().all(|&col| {
                let blocked = col & below_ceiling;
                blocked & blocked.wrapping_add(1) == 0
            })
        })
    }

    /// Drop every reach bit that sits on a blocked anchor.
    pub fn non_collides(&self, reach: &mut Layers) {
        for (r, layer) in reach.iter_mut().enumerate() {
            for (x, col) in layer.iter_mut().enumerate() {
                *col &= self.free(r, x as i8);
            }
        }
    }

    /// Lateral closure: spread every row sideways through free anchors.
    pub fn shift(&self, reach: &mut Layers) {
        for &rotation in self.rotations() {
            let r = rotation as usize;
            let row = &mut reach[r];
            for x in 1..Board::WIDTH {
                row[x] |= row[x - 1] & self.free(r, x as i8);
            }
            for x in (0..Board::WIDTH - 1).rev() {
                row[x] |= row[x + 1] & self.free(r, x as i8);
            }
        }
    }

    /// Soft-drop closure for every column.
    pub fn smear_drop(&self, reach: &mut Layers) {
        for &rotation in self.rotations() {
            let r = rotation as usize;
            for x in 0..Board::WIDTH {
                reach[r][x] = fill_down(reach[r][x], self.free(r, x as i8));
            }
        }
    }

    /// Landing bits of every kick rotation out of `reach`.
    pub fn rotate_srs(&self, reach: &Layers) -> Layers {
        let mut landed = EMPTY_LAYERS;
        if self.kind == PieceType::O {
            return landed;
        }
        for from in Rotation::ALL {
            for dir in TurnDirection::BOTH {
                self.rotate_cascade(reach, from, dir, |to, x, _, bits| landed[to][x] |= bits);
            }
        }
        landed
    }

    /// Run the kick list for one turn over all of `from`'s reach at once.
    /// Sources that land on kick i are withheld from kick i + 1, which keeps
    /// the first-fit priority of a single rotation. `land` receives
    /// (target rotation, target x, kick index, landed rows).
    pub fn rotate_cascade(
        &self,
        reach: &Layers,
        from: Rotation,
        dir: TurnDirection,
        mut land: impl FnMut(usize, usize, usize, u32),
    ) {
        let to = from.turn(dir) as usize;
        let mut pending = reach[from as usize];
        for (i, &(dx, dy)) in kicks(self.kind, from, dir).iter().enumerate() {
            for (x, src) in pending.iter_mut().enumerate() {
                if *src == 0 {
                    continue;
                }
                let tx = x as i8 + dx;
                if !(0..Board::WIDTH as i8).contains(&tx) {
                    continue;
                }
                let ok = shift_rows(*src, dy) & self.free(to, tx);
                if ok != 0 {
                    land(to, tx as usize, i, ok);
                    *src &= !shift_rows(ok, -dy);
                }
            }
        }
    }

    /// Anchors that cannot move left, right or up.
    #[inline]
    pub fn immobile(&self, r: usize, x: usize) -> u32 {
        let x = x as i8;
        let up = (self.blocked(r, x) >> 1) | (1 << 31);
        self.blocked(r, x - 1) & self.blocked(r, x + 1) & up
    }

    /// T corner occupancy per anchor row, ordered like `T_CORNERS`.
    pub fn t_corners(&self, r: usize, x: usize) -> [u32; 4] {
        T_CORNERS[r].map(|(cx, cy)| {
            let col = x as i8 + cx;
            if !(0..Board::WIDTH as i8).contains(&col) {
                return u32::MAX;
            }
            let bits = self.board.column(col as usize);
            if cy > 0 {
                bits >> 1
            } else {
                (bits << 1) | 1
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::collides;

    fn sample_board() -> Board {
        "\
        .....#....
        .#........
        .#..##...#
        ##.####.##"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_smear_matches_collision_checks() {
        let board = sample_board();
        for kind in PieceType::ALL {
            let smeared = SmearedBoard::smear(&board, kind);
            for rotation in Rotation::ALL {
                for x in -2..12 {
                    for y in 0..Board::HEIGHT as i8 {
                        let p = Piece::at(kind, rotation, x, y);
                        assert_eq!(smeared.collides(&p), collides(&board, &p), "{kind:?} {rotation:?} {x} {y}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_fill_down() {
        assert_eq!(fill_down(0b1000_0000, 0b1111_1100), 0b1111_1100);
        assert_eq!(fill_down(0b1000_0000, 0b1110_1111), 0b1110_0000);
        assert_eq!(fill_down(1 << 31, u32::MAX), u32::MAX);
        assert_eq!(fill_down(0, u32::MAX), 0);
    }

    #[test]
    fn test_shift_closes_rows() {
        let smeared = SmearedBoard::smear(&Board::new(), PieceType::O);
        let mut reach = EMPTY_LAYERS;
        reach[0][4] = 1 << 5;
        smeared.shift(&mut reach);
        for x in 0..9 {
            assert_eq!(reach[0][x], 1 << 5, "x={x}");
        }
        assert_eq!(reach[0][9], 0);
    }

    #[test]
    fn test_cascade_matches_try_rotate() {
        use crate::movement::try_rotate;
        let board = sample_board();
        for kind in [PieceType::T, PieceType::I, PieceType::S, PieceType::L] {
            let smeared = SmearedBoard::smear(&board, kind);
            let mut all = EMPTY_LAYERS;
            for (r, layer) in all.iter_mut().enumerate() {
                for (x, col) in layer.iter_mut().enumerate() {
                    *col = smeared.free(r, x as i8) & low_mask(8);
                }
            }
            for from in Rotation::ALL {
                for dir in TurnDirection::BOTH {
                    let mut expected = EMPTY_LAYERS;
                    for x in 0..Board::WIDTH as i8 {
                        for y in 0..8 {
                            let p = Piece::at(kind, from, x, y);
                            if smeared.collides(&p) {
                                continue;
                            }
                            if let Some(r) = try_rotate(&board, &p, dir) {
                                expected[r.piece.rotation as usize][r.piece.x as usize] |= 1 << r.piece.y;
                            }
                        }
                    }
                    let mut got = EMPTY_LAYERS;
                    smeared.rotate_cascade(&all, from, dir, |to, x, _, bits| got[to][x] |= bits);
                    assert_eq!(got, expected, "{kind:?} {from:?} {dir:?}");
                }
            }
        }
    }

    #[test]
    fn test_convexity() {
        let flat: Board = "\
            ##......##
            ####..####"
            .parse()
            .unwrap();
        for kind in PieceType::ALL {
            assert!(SmearedBoard::smear(&flat, kind).is_convex(), "{kind:?}");
        }
        let overhang: Board = "\
            ####......
            ..........
            #........."
            .parse()
            .unwrap();
        assert!(!SmearedBoard::smear(&overhang, PieceType::T).is_convex());
    }

    #[test]
    fn test_immobile_in_sealed_slot() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            for y in 0..3 {
                board.set(x, y);
            }
        }
        let slot = Piece::at(PieceType::T, Rotation::North, 4, 1);
        board.unset_piece(&slot);
        let smeared = SmearedBoard::smear(&board, PieceType::T);
        assert_ne!(smeared.immobile(0, 4) & (1 << 1), 0);
        assert_eq!(smeared.immobile(0, 4) & (1 << 3), 0);
    }
}
