//! TETR.IO season 1 damage: line table, logarithmic b2b chains, combo
//! multiplier with a log floor, flat perfect-clear bonus.

use shaktris_core::SpinType;

use super::ScoringMode;
use crate::config::TetrioS1Options;

pub const SINGLE: u32 = 0;
pub const DOUBLE: u32 = 1;
pub const TRIPLE: u32 = 2;
pub const QUAD: u32 = 4;
pub const TSPIN_MINI_SINGLE: u32 = 0;
pub const TSPIN_SINGLE: u32 = 2;
pub const TSPIN_MINI_DOUBLE: u32 = 1;
pub const TSPIN_DOUBLE: u32 = 4;
pub const TSPIN_TRIPLE: u32 = 6;
pub const TSPIN_QUAD: u32 = 10;
pub const B2B_BONUS: u32 = 1;
pub const B2B_BONUS_LOG: f32 = 0.8;
pub const COMBO_BONUS: f32 = 0.25;
pub const COMBO_MINIFIER_LOG: f32 = 1.25;
pub const ALL_CLEAR: u32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TetrioS1 {
    pub options: TetrioS1Options,
    /// largest damage sent during the current combo (3+ clears)
    pub current_combo_power: u16,
    /// largest b2b bonus during the current chain
    pub current_b2b_chain_power: u16,
}

impl TetrioS1 {
    pub fn new(options: TetrioS1Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}

pub fn base_garbage(lines: u32, spin: SpinType) -> u32 {
    match (lines, spin) {
        (0, _) => 0,
        (1, SpinType::Mini) => TSPIN_MINI_SINGLE,
        (1, SpinType::Normal) => TSPIN_SINGLE,
        (1, SpinType::None) => SINGLE,
        (2, SpinType::Mini) => TSPIN_MINI_DOUBLE,
        (2, SpinType::Normal) => TSPIN_DOUBLE,
        (2, SpinType::None) => DOUBLE,
        (3, SpinType::None) => TRIPLE,
        (3, _) => TSPIN_TRIPLE,
        (_, SpinType::None) => QUAD,
        (_, _) => TSPIN_QUAD,
    }
}

/// Chained b2b bonus for a chain of length `b2b`, truncated. Chains shorter
/// than two earn nothing.
pub fn b2b_chain_bonus(b2b: u16) -> u32 {
    if b2b <= 1 {
        return 0;
    }
    let level = (b2b - 1) as f32;
    let log = (level * B2B_BONUS_LOG).ln_1p();
    let tail = if b2b - 1 <= 1 {
        0.0
    } else {
        (1.0 + log - log.trunc()) / 3.0
    };
    (B2B_BONUS as f32 * (1.0 + log + tail)) as u32
}

impl ScoringMode for TetrioS1 {
    fn points(&mut self, lines: u32, spin: SpinType, perfect_clear: bool, combo: &mut u16, b2b: &mut u16) -> u32 {
        if lines > 0 {
            *combo = combo.saturating_add(1);
            if lines == 4 || spin.is_spin() {
                *b2b = b2b.saturating_add(1);
            } else {
                *b2b = 0;
            }
        } else {
            *combo = 0;
            self.current_combo_power = 0;
        }

        let mut garbage = base_garbage(lines, spin);

        if lines > 0 {
            if *b2b > 1 {
                if self.options.b2b_chaining {
                    let bonus = b2b_chain_bonus(*b2b);
                    garbage += bonus;
                    self.current_b2b_chain_power = self.current_b2b_chain_power.max(bonus as u16);
                } else {
                    garbage += B2B_BONUS;
                }
            } else {
                self.current_b2b_chain_power = 0;
            }
        }

        if *combo > 1 {
            garbage = (garbage as f32 * (1.0 + COMBO_BONUS * (*combo - 1) as f32)) as u32;
        }
        if *combo > 2 {
            let floor = ((*combo - 1) as f32 * COMBO_MINIFIER_LOG).ln_1p() as u32;
            garbage = garbage.max(floor);
        }

        let total = garbage * self.options.garbage_multiplier as u32;
        if *combo > 2 {
            self.current_combo_power = self.current_combo_power.max(total as u16);
        }

        total + if perfect_clear { ALL_CLEAR } else { 0 }
    }
}
