use shaktris_core::PieceType;

/// Seeded 7-bag randomizer: every run of seven draws is a permutation of
/// the seven piece types.
#[derive(Clone, Debug)]
pub struct SevenBag {
    state: u32,
    pieces: [PieceType; 7],
    index: usize,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            state: if seed == 0 { 1 } else { seed },
            pieces: PieceType::ALL,
            index: 0,
        };
        bag.shuffle();
        bag
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn shuffle(&mut self) {
        self.pieces = PieceType::ALL;
        for i in (1..self.pieces.len()).rev() {
            let j = (self.next_u32() % (i as u32 + 1)) as usize;
            self.pieces.swap(i, j);
        }
        self.index = 0;
    }

    pub fn next_piece(&mut self) -> PieceType {
        if self.index == self.pieces.len() {
            self.shuffle();
        }
        let piece = self.pieces[self.index];
        self.index += 1;
        piece
    }

    pub fn peek(&self) -> Option<PieceType> {
        self.pieces.get(self.index).copied()
    }

    /// Pieces left before the next reshuffle.
    pub fn remaining(&self) -> &[PieceType] {
        &self.pieces[self.index..]
    }
}

impl Iterator for SevenBag {
    type Item = PieceType;

    fn next(&mut self) -> Option<PieceType> {
        Some(self.next_piece())
    }
}
