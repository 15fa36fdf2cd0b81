//! Botris damage: fixed attack table, all-spin bonus for full spins, combo
//! table, +1 while back-to-back.

use shaktris_core::SpinType;

use super::ScoringMode;

pub const COMBO_TABLE: [u32; 10] = [0, 0, 1, 1, 1, 2, 2, 3, 3, 4];
pub const ATTACK_TABLE: [u32; 5] = [0, 0, 1, 2, 4];
pub const ALL_SPIN_BONUS: [u32; 5] = [0, 2, 4, 6, 0];
pub const PC_BONUS: u32 = 10;
pub const B2B_BONUS: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Botris;

impl ScoringMode for Botris {
    /// `b2b` is a flag here: 1 while the last clear was a quad or a spin.
    fn points(&mut self, lines: u32, spin: SpinType, perfect_clear: bool, combo: &mut u16, b2b: &mut u16) -> u32 {
        if lines == 0 {
            *combo = 0;
            return 0;
        }

        *combo = combo.saturating_add(1);
        *b2b = u16::from(lines == 4 || spin.is_spin());

        let lines = (lines as usize).min(ATTACK_TABLE.len() - 1);
        let mut garbage = ATTACK_TABLE[lines];
        if spin == SpinType::Normal {
            garbage += ALL_SPIN_BONUS[lines];
        }
        garbage += COMBO_TABLE[(*combo as usize).min(COMBO_TABLE.len() - 1)];
        if perfect_clear {
            garbage += PC_BONUS;
        }
        if *b2b != 0 {
            garbage += B2B_BONUS;
        }
        garbage
    }
}
