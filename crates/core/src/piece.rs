//! Piece types, rotation states and mino definitions.
//! Minos are stored relative to the rotation centre; every piece keeps the
//! (0, 0) mino in every rotation, so a placed anchor is always on the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Board, ParseError, SpinType, TurnDirection};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    S,
    Z,
    J,
    L,
    T,
    O,
    I,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

/// North orientation of each piece, indexed by `PieceType as usize`.
const NORTH_MINOS: [[(i8, i8); 4]; 7] = [
    [(-1, 0), (0, 0), (0, 1), (1, 1)],  // S
    [(-1, 1), (0, 1), (0, 0), (1, 0)],  // Z
    [(-1, 0), (0, 0), (1, 0), (-1, 1)], // J
    [(-1, 0), (0, 0), (1, 0), (1, 1)],  // L
    [(-1, 0), (0, 0), (1, 0), (0, 1)],  // T
    [(0, 0), (1, 0), (0, 1), (1, 1)],   // O
    [(-1, 0), (0, 0), (1, 0), (2, 0)],  // I
];

/// MINO_TABLE[type][rotation] - each rotation turns the previous one
/// clockwise about the origin: (x, y) -> (y, -x).
const MINO_TABLE: [[[(i8, i8); 4]; 4]; 7] = {
    let mut table = [[[(0i8, 0i8); 4]; 4]; 7];
    let mut kind = 0;
    while kind < 7 {
        let mut rot = 0;
        while rot < 4 {
            let mut i = 0;
            while i < 4 {
                let (mut x, mut y) = NORTH_MINOS[kind][i];
                let mut turns = 0;
                while turns < rot {
                    let t = x;
                    x = y;
                    y = -t;
                    turns += 1;
                }
                table[kind][rot][i] = (x, y);
                i += 1;
            }
            rot += 1;
        }
        kind += 1;
    }
    table
};

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::S,
        PieceType::Z,
        PieceType::J,
        PieceType::L,
        PieceType::T,
        PieceType::O,
        PieceType::I,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub fn minos(self, rotation: Rotation) -> [(i8, i8); 4] {
        MINO_TABLE[self as usize][rotation as usize]
    }

    pub fn to_char(self) -> char {
        match self {
            PieceType::S => 'S',
            PieceType::Z => 'Z',
            PieceType::J => 'J',
            PieceType::L => 'L',
            PieceType::T => 'T',
            PieceType::O => 'O',
            PieceType::I => 'I',
        }
    }

    /// Parse a queue string such as "IOTLJSZ".
    pub fn parse_queue(s: &str) -> Result<Vec<PieceType>, ParseError> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(PieceType::try_from)
            .collect()
    }
}

impl TryFrom<char> for PieceType {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'S' => Ok(PieceType::S),
            'Z' => Ok(PieceType::Z),
            'J' => Ok(PieceType::J),
            'L' => Ok(PieceType::L),
            'T' => Ok(PieceType::T),
            'O' => Ok(PieceType::O),
            'I' => Ok(PieceType::I),
            other => Err(ParseError::UnknownPiece(other)),
        }
    }
}

impl FromStr for PieceType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceType::try_from(c),
            _ => Err(ParseError::NotAPiece(s.to_string())),
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i & 3]
    }

    pub fn cw(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    pub fn ccw(self) -> Self {
        Self::from_index(self as usize + 3)
    }

    pub fn turn(self, dir: TurnDirection) -> Self {
        match dir {
            TurnDirection::Right => self.cw(),
            TurnDirection::Left => self.ccw(),
        }
    }
}

/// Rotation with the same footprint and the anchor shift that gets there.
/// O collapses to North; I, S and Z fold South onto North and West onto East.
const fn canonical_form(kind: PieceType, rotation: Rotation) -> (Rotation, i8, i8) {
    match (kind, rotation) {
        (PieceType::O, Rotation::East) => (Rotation::North, 0, -1),
        (PieceType::O, Rotation::South) => (Rotation::North, -1, -1),
        (PieceType::O, Rotation::West) => (Rotation::North, -1, 0),
        (PieceType::S | PieceType::Z, Rotation::South) => (Rotation::North, 0, -1),
        (PieceType::S | PieceType::Z, Rotation::West) => (Rotation::East, -1, 0),
        (PieceType::I, Rotation::South) => (Rotation::North, -1, 0),
        (PieceType::I, Rotation::West) => (Rotation::East, 0, 1),
        (_, r) => (r, 0, 0),
    }
}

/// An active or placed piece: type, rotation, anchor and the spin it was
/// brought to rest with.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub spin: SpinType,
}

impl Piece {
    pub const SPAWN_X: i8 = 4;
    pub const SPAWN_Y: i8 = 19;

    /// Number of distinct (type, rotation, x, y) states with an on-board anchor.
    pub const STATE_COUNT: usize = 7 * 4 * Board::WIDTH * Board::HEIGHT;

    /// A fresh piece at the spawn position.
    pub fn new(kind: PieceType) -> Self {
        Self::at(kind, Rotation::North, Self::SPAWN_X, Self::SPAWN_Y)
    }

    pub fn at(kind: PieceType, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
            spin: SpinType::None,
        }
    }

    pub fn with_spin(mut self, spin: SpinType) -> Self {
        self.spin = spin;
        self
    }

    #[inline(always)]
    pub fn minos(&self) -> [(i8, i8); 4] {
        self.kind.minos(self.rotation)
    }

    /// Absolute board cells covered by the piece.
    #[inline]
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.minos().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Turn in place without kicks.
    pub fn rotate(&mut self, dir: TurnDirection) {
        self.rotation = self.rotation.turn(dir);
    }

    /// Dense index in `0..STATE_COUNT` for anchors on the board.
    #[inline(always)]
    pub fn compact_hash(&self) -> usize {
        let x = self.x as usize;
        let y = self.y as usize;
        self.rotation as usize
            + 4 * (x + Board::WIDTH * (y + Board::HEIGHT * self.kind as usize))
    }

    /// Same footprint, expressed in the canonical rotation of its type.
    pub fn canonical(&self) -> Piece {
        let (rotation, dx, dy) = canonical_form(self.kind, self.rotation);
        Piece {
            rotation,
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn is_canonical(&self) -> bool {
        canonical_form(self.kind, self.rotation).0 == self.rotation
    }

    /// Ordering key for placement lists.
    #[inline]
    pub fn sort_key(&self) -> (u8, i8, i8) {
        (self.rotation as u8, self.x, self.y)
    }
}

/// Canonical anchor offset for one rotation, used by the bitboard generator.
pub fn canonical_shift(kind: PieceType, rotation: Rotation) -> (Rotation, i8, i8) {
    canonical_form(kind, rotation)
}
