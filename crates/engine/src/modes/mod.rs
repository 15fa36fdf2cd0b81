//! Scoring modes. Each turns a clear into outgoing damage and updates the
//! caller's combo and back-to-back counters.

mod botris;
mod tetrio_s1;

use shaktris_core::SpinType;

use crate::config::ModeKind;

pub use botris::Botris;
pub use tetrio_s1::{b2b_chain_bonus, base_garbage, TetrioS1};

pub trait ScoringMode {
    /// Damage for one placement. Counters are advanced before damage is
    /// computed, so the clear that starts a combo already counts toward it.
    fn points(&mut self, lines: u32, spin: SpinType, perfect_clear: bool, combo: &mut u16, b2b: &mut u16) -> u32;
}

/// Closed set of scoring modes, dispatched without boxing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    TetrioS1(TetrioS1),
    Botris(Botris),
}

impl Mode {
    pub fn from_kind(kind: ModeKind) -> Self {
        match kind {
            ModeKind::TetrioS1 { options } => Mode::TetrioS1(TetrioS1::new(options)),
            ModeKind::Botris => Mode::Botris(Botris),
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::from_kind(ModeKind::default())
    }
}

impl ScoringMode for Mode {
    #[inline]
    fn points(&mut self, lines: u32, spin: SpinType, perfect_clear: bool, combo: &mut u16, b2b: &mut u16) -> u32 {
        match self {
            Mode::TetrioS1(m) => m.points(lines, spin, perfect_clear, combo, b2b),
            Mode::Botris(m) => m.points(lines, spin, perfect_clear, combo, b2b),
        }
    }
}
