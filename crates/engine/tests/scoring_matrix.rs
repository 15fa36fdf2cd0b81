use shaktris_core::SpinType;
use shaktris_engine::{Botris, Mode, ModeKind, ScoringMode, TetrioS1, TetrioS1Options};

/// Feed `turns` of (lines, spin, perfect clear) through a fresh counter pair
/// and return the damage of each turn.
fn run(mode: &mut impl ScoringMode, turns: &[(u32, SpinType, bool)]) -> Vec<u32> {
    let (mut combo, mut b2b) = (0u16, 0u16);
    turns
        .iter()
        .map(|&(lines, spin, pc)| mode.points(lines, spin, pc, &mut combo, &mut b2b))
        .collect()
}

const MISS: (u32, SpinType, bool) = (0, SpinType::None, false);
const SINGLE: (u32, SpinType, bool) = (1, SpinType::None, false);
const DOUBLE: (u32, SpinType, bool) = (2, SpinType::None, false);
const TRIPLE: (u32, SpinType, bool) = (3, SpinType::None, false);
const QUAD: (u32, SpinType, bool) = (4, SpinType::None, false);
const TSMS: (u32, SpinType, bool) = (1, SpinType::Mini, false);
const TSMD: (u32, SpinType, bool) = (2, SpinType::Mini, false);
const TSD: (u32, SpinType, bool) = (2, SpinType::Normal, false);
const TST: (u32, SpinType, bool) = (3, SpinType::Normal, false);

mod tetrio_basic_clears {
    use super::*;

    #[test]
    fn test_line_table_without_counters() {
        for (turn, expected) in [(SINGLE, 0), (DOUBLE, 1), (TRIPLE, 2), (QUAD, 4), (TSMS, 0), (TSMD, 1), (TSD, 4), (TST, 6)] {
            assert_eq!(run(&mut TetrioS1::default(), &[turn]), vec![expected], "{turn:?}");
        }
    }

    #[test]
    fn test_tspin_quad() {
        assert_eq!(run(&mut TetrioS1::default(), &[(4, SpinType::Normal, false)]), vec![10]);
    }

    #[test]
    fn test_miss_sends_nothing() {
        assert_eq!(run(&mut TetrioS1::default(), &[MISS, MISS]), vec![0, 0]);
    }

    #[test]
    fn test_perfect_clear_single() {
        assert_eq!(run(&mut TetrioS1::default(), &[(1, SpinType::None, true)]), vec![10]);
    }

    #[test]
    fn test_garbage_multiplier() {
        let mut mode = TetrioS1::new(TetrioS1Options {
            garbage_multiplier: 2,
            ..TetrioS1Options::default()
        });
        assert_eq!(run(&mut mode, &[TSD, MISS, (1, SpinType::None, true)]), vec![8, 0, 10]);
    }
}

mod tetrio_back_to_back {
    use super::*;

    #[test]
    fn test_tsd_chain_with_combo() {
        assert_eq!(run(&mut TetrioS1::default(), &[TSD, TSD, TSD]), vec![4, 6, 9]);
    }

    #[test]
    fn test_quad_chain_between_misses() {
        let turns = [QUAD, MISS, QUAD, MISS, QUAD, MISS, QUAD];
        assert_eq!(run(&mut TetrioS1::default(), &turns), vec![4, 0, 5, 0, 6, 0, 6]);
    }

    #[test]
    fn test_classic_flat_bonus() {
        let mut mode = TetrioS1::new(TetrioS1Options::classic());
        let turns = [QUAD, MISS, QUAD, MISS, QUAD];
        assert_eq!(run(&mut mode, &turns), vec![4, 0, 5, 0, 5]);
    }

    #[test]
    fn test_mini_keeps_chain() {
        assert_eq!(run(&mut TetrioS1::default(), &[TSMS, MISS, TSD]), vec![0, 0, 5]);
    }

    #[test]
    fn test_plain_clear_breaks_chain() {
        let mut mode = TetrioS1::default();
        let (mut combo, mut b2b) = (0, 0);
        for turn in [QUAD, MISS, QUAD, MISS, DOUBLE] {
            mode.points(turn.0, turn.1, turn.2, &mut combo, &mut b2b);
        }
        assert_eq!(b2b, 0);
        assert_eq!(mode.current_b2b_chain_power, 0);
    }

    #[test]
    fn test_chain_power_tracks_bonus() {
        let mut mode = TetrioS1::default();
        run(&mut mode, &[QUAD, MISS, QUAD, MISS, QUAD]);
        assert_eq!(mode.current_b2b_chain_power, 2);
    }
}

mod tetrio_combo {
    use super::*;

    #[test]
    fn test_singles_hit_log_floor() {
        assert_eq!(run(&mut TetrioS1::default(), &[SINGLE; 7]), vec![0, 0, 1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_doubles_multiplier() {
        // 1, 1.25, 1.5, 1.75, 2.0 truncated; floor log1p((c - 1) * 1.25)
        assert_eq!(run(&mut TetrioS1::default(), &[DOUBLE; 5]), vec![1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_combo_power() {
        let mut mode = TetrioS1::default();
        run(&mut mode, &[TRIPLE, TRIPLE, TRIPLE]);
        assert_eq!(mode.current_combo_power, 3);
        run(&mut mode, &[MISS]);
        assert_eq!(mode.current_combo_power, 0);
    }
}

mod botris {
    use super::*;

    #[test]
    fn test_first_clears() {
        for (turn, expected) in [(SINGLE, 0), (DOUBLE, 1), (TRIPLE, 2), (QUAD, 5), (TSMD, 2), (TSD, 6), (TST, 9)] {
            assert_eq!(run(&mut Botris, &[turn]), vec![expected], "{turn:?}");
        }
    }

    #[test]
    fn test_combo_table() {
        assert_eq!(run(&mut Botris, &[SINGLE; 11]), vec![0, 1, 1, 1, 2, 2, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_miss_resets_combo_keeps_b2b() {
        let (mut combo, mut b2b) = (0, 0);
        assert_eq!(Botris.points(4, SpinType::None, false, &mut combo, &mut b2b), 5);
        assert_eq!(Botris.points(0, SpinType::None, false, &mut combo, &mut b2b), 0);
        assert_eq!((combo, b2b), (0, 1));
        assert_eq!(Botris.points(1, SpinType::None, false, &mut combo, &mut b2b), 0);
        assert_eq!(b2b, 0);
    }

    #[test]
    fn test_perfect_clear() {
        assert_eq!(run(&mut Botris, &[(2, SpinType::None, true)]), vec![11]);
    }
}

mod dispatch {
    use super::*;

    #[test]
    fn test_mode_matches_inner() {
        let turns = [TSD, TSD, MISS, QUAD, SINGLE, SINGLE];
        let mut tetrio = Mode::from_kind(ModeKind::default());
        assert_eq!(run(&mut tetrio, &turns), run(&mut TetrioS1::default(), &turns));
        let mut botris = Mode::from_kind(ModeKind::Botris);
        assert_eq!(run(&mut botris, &turns), run(&mut Botris, &turns));
    }
}
