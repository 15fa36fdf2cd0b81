//! board representation - column-major u32s for fast bitwise ops
//! bit y of column x is cell (x, y); row 0 is the floor

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bits::{low_mask, pext};
use crate::{ParseError, Piece};

/// 10x32 Tetris board using column-major u32 bitfields.
/// Rows 0-19 are visible, 20-31 hold spawn space and overflow.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct Board {
    cols: [u32; 10],
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 32;
    pub const VISIBLE_HEIGHT: usize = 20;
    /// Boards with nothing at or above this row are "low": the spawn area
    /// and everything a piece can do there without gravity is untouched.
    pub const LOW_ROW: u32 = Piece::SPAWN_Y as u32 - 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(cols: [u32; 10]) -> Self {
        Self { cols }
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        (self.cols[x] >> y) & 1 == 1
    }

    /// Cell lookup for signed coordinates: side walls and the floor read as
    /// filled, anything above the top row reads as empty.
    #[inline]
    pub fn filled(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= Self::WIDTH as i8 || y < 0 {
            return true;
        }
        if y >= Self::HEIGHT as i8 {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    pub fn set(&mut self, x: usize, y: usize) {
        self.cols[x] |= 1 << y;
    }

    pub fn unset(&mut self, x: usize, y: usize) {
        self.cols[x] &= !(1 << y);
    }

    /// Write the piece's cells into the board. Cells off the board are ignored.
    pub fn set_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if Self::in_bounds(x, y) {
                self.set(x as usize, y as usize);
            }
        }
    }

    pub fn unset_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if Self::in_bounds(x, y) {
                self.unset(x as usize, y as usize);
            }
        }
    }

    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        (0..Self::WIDTH as i8).contains(&x) && (0..Self::HEIGHT as i8).contains(&y)
    }

    /// Get raw column data
    #[inline(always)]
    pub fn column(&self, x: usize) -> u32 {
        self.cols[x]
    }

    #[inline(always)]
    pub fn set_column(&mut self, x: usize, value: u32) {
        self.cols[x] = value;
    }

    #[inline(always)]
    pub fn columns(&self) -> &[u32; 10] {
        &self.cols
    }

    /// Bitmask of rows that are filled in every column.
    #[inline]
    pub fn full_rows_mask(&self) -> u32 {
        self.cols.iter().fold(u32::MAX, |acc, &c| acc & c)
    }

    /// Number of full rows, without clearing them.
    pub fn filled_rows(&self) -> u32 {
        self.full_rows_mask().count_ones()
    }

    /// Remove every full row and compact the rest down. Returns rows cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let mask = self.full_rows_mask();
        if mask == 0 {
            return 0;
        }
        let keep = !mask;
        for col in self.cols.iter_mut() {
            *col = pext(*col, keep);
        }
        mask.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.iter().all(|&c| c == 0)
    }

    /// Push `lines` rows of garbage in from the floor with the hole at
    /// column `location`. Rows pushed past the top are lost.
    pub fn add_garbage(&mut self, lines: u32, location: usize) {
        let fill = low_mask(lines);
        for (x, col) in self.cols.iter_mut().enumerate() {
            *col = col.checked_shl(lines).unwrap_or(0);
            if x != location {
                *col |= fill;
            }
        }
    }

    /// Height of column x (one past its highest filled cell).
    #[inline]
    pub fn column_height(&self, x: usize) -> u32 {
        32 - self.cols[x].leading_zeros()
    }

    pub fn max_height(&self) -> u32 {
        (0..Self::WIDTH).map(|x| self.column_height(x)).max().unwrap_or(0)
    }

    /// Height of the shortest column, i.e. rows every column reaches.
    pub fn garbage_height(&self) -> u32 {
        let max_lz = self.cols.iter().map(|c| c.leading_zeros()).max().unwrap_or(32);
        32 - max_lz
    }

    /// Nothing at or above `LOW_ROW`.
    pub fn is_low(&self) -> bool {
        let high = !low_mask(Self::LOW_ROW);
        self.cols.iter().all(|&c| c & high == 0)
    }

    /// Surface convexity above the garbage line: once the lowest
    /// `garbage_height` rows are discarded, no column has a hole.
    /// Holes below that line are not inspected, so this says nothing about
    /// kicks into sealed pockets; movegen gates on `is_true_convex` instead.
    pub fn is_convex(&self) -> bool {
        let h = self.garbage_height();
        self.cols.iter().all(|&c| {
            let top = c.checked_shr(h).unwrap_or(0);
            top.count_ones() == top.trailing_ones()
        })
    }

    /// Every column is a solid stack from the floor.
    pub fn is_true_convex(&self) -> bool {
        self.cols
            .iter()
            .all(|&c| c.count_ones() == c.trailing_ones())
    }

    /// Empty cells below each column's top, summed over the board.
    pub fn hole_count(&self) -> u32 {
        (0..Self::WIDTH)
            .map(|x| self.column_height(x) - self.cols[x].count_ones())
            .sum()
    }

    /// Raw row bitmap, bit x = column x.
    pub fn row(&self, y: usize) -> u16 {
        (0..Self::WIDTH).fold(0u16, |acc, x| acc | (((self.cols[x] >> y) & 1) as u16) << x)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut rows = [0u16; Board::HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            *row = self.row(y);
        }
        rows.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows: Vec<u16> = Vec::deserialize(deserializer)?;
        if rows.len() != Board::HEIGHT {
            return Err(serde::de::Error::custom("expected 32 rows"));
        }
        let mut cols = [0u32; Board::WIDTH];
        for (y, &value) in rows.iter().enumerate() {
            for (x, col) in cols.iter_mut().enumerate() {
                if (value >> x) & 1 == 1 {
                    *col |= 1 << y;
                }
            }
        }
        Ok(Board { cols })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..Self::VISIBLE_HEIGHT).rev() {
            for x in 0..Self::WIDTH {
                write!(f, "{}", if self.get(x, y) { "[]" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Text boards: one line per row, top row first, `#`/`X` filled and `.`
/// empty. The last line is row 0. Blank lines are skipped.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() > Self::HEIGHT {
            return Err(ParseError::TooManyRows(lines.len()));
        }
        let mut board = Board::new();
        for (i, line) in lines.iter().rev().enumerate() {
            let len = line.chars().count();
            if len != Self::WIDTH {
                return Err(ParseError::RowWidth { row: i, len });
            }
            for (x, c) in line.chars().enumerate() {
                match c {
                    '#' | 'X' => board.set(x, i),
                    '.' => {}
                    other => return Err(ParseError::BadCell(other)),
                }
            }
        }
        Ok(board)
    }
}
