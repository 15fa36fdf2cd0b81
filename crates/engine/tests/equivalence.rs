//! Both placement generators must agree exactly, spins included, and every
//! placement they produce must rest on the stack without overlapping it.

use proptest::prelude::*;
use shaktris_core::bits::low_mask;
use shaktris_core::{Board, Piece, PieceType, Rotation, SpinType, TurnDirection};
use shaktris_engine::{collides, is_grounded, movegen_smeared, traditional, try_rotate, Game};

fn board(rows: &str) -> Board {
    rows.parse().unwrap()
}

fn corpus() -> Vec<(&'static str, Board)> {
    vec![
        ("empty", Board::new()),
        (
            "convex",
            board(
                "#........#
                 ##...#..##
                 ####.#####",
            ),
        ),
        (
            "overhang",
            board(
                "......####
                 ##........
                 ##..#....#
                 ###.##.###",
            ),
        ),
        (
            "holes",
            board(
                "#.#...##..
                 ##.#.###.#
                 .####.####
                 ####.#####",
            ),
        ),
        (
            "tst",
            board(
                "...#......
                 ..........
                 ###.######
                 ###..#####
                 ###.######",
            ),
        ),
        (
            "tall convex",
            Board::from_columns([18, 18, 17, 16, 12, 14, 18, 18, 18, 15].map(low_mask)),
        ),
        (
            "well",
            board(
                "#########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.
                 #########.",
            ),
        ),
    ]
}

fn assert_well_formed(board: &Board, placements: &[Piece]) {
    for p in placements {
        assert!(!collides(board, p), "{p:?} overlaps");
        assert!(is_grounded(board, p), "{p:?} floats");
        assert!(p.is_canonical(), "{p:?} not canonical");
    }
    for pair in placements.windows(2) {
        assert!(pair[0].sort_key() < pair[1].sort_key(), "{:?} / {:?}", pair[0], pair[1]);
    }
}

mod corpus_boards {
    use super::*;

    #[test]
    fn test_generators_agree() {
        for (name, board) in corpus() {
            for kind in PieceType::ALL {
                let smeared = movegen_smeared::movegen(&board, kind);
                let traditional = traditional::movegen(&board, kind);
                assert_eq!(smeared, traditional, "{name} {kind:?}");
                assert_well_formed(&board, &smeared);
            }
        }
    }

    #[test]
    fn test_fast_paths_agree_with_general_search() {
        for (name, board) in corpus() {
            for kind in PieceType::ALL {
                assert_eq!(
                    movegen_smeared::movegen(&board, kind),
                    movegen_smeared::flood_fill_movegen(&board, kind),
                    "{name} {kind:?}"
                );
                assert_eq!(
                    traditional::movegen(&board, kind),
                    traditional::bfs_movegen(&board, kind),
                    "{name} {kind:?}"
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        for (_, board) in corpus() {
            for kind in PieceType::ALL {
                assert_eq!(shaktris_engine::movegen(&board, kind), shaktris_engine::movegen(&board, kind));
            }
        }
    }

    #[test]
    fn test_well_reaches_bottom() {
        let (_, well) = &corpus()[6];
        let found = traditional::movegen(well, PieceType::I)
            .into_iter()
            .any(|p| p.rotation == Rotation::East && p.x == 9 && p.y == 2);
        assert!(found);
    }
}

mod empty_board {
    use super::*;

    #[test]
    fn test_i_has_17_placements_on_the_floor() {
        let placements = shaktris_engine::movegen(&Board::new(), PieceType::I);
        assert_eq!(placements.len(), 17);
        for p in placements {
            assert_eq!(p.cells().iter().map(|&(_, y)| y).min(), Some(0));
        }
    }

    #[test]
    fn test_o_raises_two_columns_without_gaps() {
        let placements = shaktris_engine::movegen(&Board::new(), PieceType::O);
        assert_eq!(placements.len(), 9);
        for p in placements {
            let mut board = Board::new();
            board.set_piece(&p);
            let heights: Vec<u32> = (0..Board::WIDTH).map(|x| board.column_height(x)).collect();
            assert_eq!(heights.iter().filter(|&&h| h == 2).count(), 2, "{p:?}");
            assert_eq!(heights.iter().filter(|&&h| h == 0).count(), 8, "{p:?}");
            assert_eq!(board.hole_count(), 0);
        }
    }

    #[test]
    fn test_kicks_are_reversible_in_free_space() {
        let board = Board::new();
        for kind in PieceType::ALL {
            for rotation in Rotation::ALL {
                for dir in TurnDirection::BOTH {
                    let start = Piece::at(kind, rotation, 4, 10);
                    let turned = try_rotate(&board, &start, dir).unwrap();
                    assert_eq!(turned.kick_index, 0);
                    let back = try_rotate(&board, &turned.piece, dir.opposite()).unwrap();
                    assert_eq!(back.kick_index, 0);
                    assert_eq!(
                        (back.piece.rotation, back.piece.x, back.piece.y),
                        (start.rotation, start.x, start.y),
                        "{kind:?} {rotation:?} {dir:?}"
                    );
                }
            }
        }
    }
}

mod t_spin_triple {
    use super::*;

    #[test]
    fn test_both_generators_flag_the_slot() {
        let (_, board) = &corpus()[4];
        for placements in [
            movegen_smeared::movegen(board, PieceType::T),
            traditional::movegen(board, PieceType::T),
        ] {
            let tst = placements
                .iter()
                .find(|p| p.rotation == Rotation::East && p.x == 3 && p.y == 1)
                .unwrap();
            assert_eq!(tst.spin, SpinType::Normal);
        }
    }

    #[test]
    fn test_play_clears_three_lines() {
        let (_, board) = &corpus()[4];
        let mut game = Game::default();
        game.board = *board;
        game.push_queue(PieceType::T).unwrap();
        let tst = game
            .possible_placements()
            .into_iter()
            .find(|p| p.rotation == Rotation::East && p.x == 3 && p.y == 1)
            .unwrap();
        let outcome = game.play(&tst).unwrap();
        assert_eq!(outcome.lines, 3);
        assert_eq!(outcome.spin, SpinType::Normal);
        assert_eq!(game.board.column_height(3), 2);
    }
}

fn low_board() -> impl Strategy<Value = Board> {
    (
        prop::array::uniform10(0u32..=12),
        prop::array::uniform10(any::<u32>()),
        prop::array::uniform10(any::<u32>()),
    )
        .prop_map(|(heights, a, b)| {
            let mut cols = [0u32; 10];
            for x in 0..Board::WIDTH {
                cols[x] = low_mask(heights[x]) | (a[x] & b[x] & low_mask(14));
            }
            Board::from_columns(cols)
        })
}

fn tall_board() -> impl Strategy<Value = Board> {
    (prop::array::uniform10(0u32..=22), prop::array::uniform10(any::<u32>())).prop_map(|(heights, noise)| {
        let mut cols = [0u32; 10];
        for x in 0..Board::WIDTH {
            cols[x] = low_mask(heights[x]) & !(noise[x] & noise[x].rotate_left(7) & low_mask(heights[x].saturating_sub(1)));
        }
        Board::from_columns(cols)
    })
}

/// Hole-free stacks, tall enough that most are not low.
fn tall_convex_board() -> impl Strategy<Value = Board> {
    prop::array::uniform10(0u32..=22).prop_map(|heights| Board::from_columns(heights.map(low_mask)))
}

proptest! {
    #[test]
    fn prop_generators_agree_on_low_boards(board in low_board(), k in 0usize..7) {
        let kind = PieceType::ALL[k];
        let smeared = movegen_smeared::movegen(&board, kind);
        prop_assert_eq!(&smeared, &traditional::movegen(&board, kind));
        prop_assert_eq!(&smeared, &movegen_smeared::flood_fill_movegen(&board, kind));
        for p in &smeared {
            prop_assert!(!collides(&board, p));
            prop_assert!(is_grounded(&board, p));
        }
    }

    #[test]
    fn prop_generators_agree_on_tall_boards(board in tall_board(), k in 0usize..7) {
        let kind = PieceType::ALL[k];
        let smeared = movegen_smeared::movegen(&board, kind);
        prop_assert_eq!(&smeared, &traditional::movegen(&board, kind));
        prop_assert_eq!(&traditional::movegen(&board, kind), &traditional::bfs_movegen(&board, kind));
        if collides(&board, &Piece::new(kind)) {
            prop_assert!(smeared.is_empty());
        }
    }

    #[test]
    fn prop_generators_agree_on_tall_convex_boards(board in tall_convex_board(), k in 0usize..7) {
        let kind = PieceType::ALL[k];
        let smeared = movegen_smeared::movegen(&board, kind);
        prop_assert_eq!(&smeared, &movegen_smeared::flood_fill_movegen(&board, kind));
        prop_assert_eq!(&smeared, &traditional::movegen(&board, kind));
        prop_assert_eq!(&smeared, &traditional::bfs_movegen(&board, kind));
    }

    #[test]
    fn prop_line_clear_removes_full_rows(board in low_board()) {
        let mut cleared = board;
        let full = board.full_rows_mask().count_ones();
        let before: u32 = board.columns().iter().map(|c| c.count_ones()).sum();
        prop_assert_eq!(cleared.clear_lines(), full);
        prop_assert_eq!(cleared.full_rows_mask(), 0);
        let after: u32 = cleared.columns().iter().map(|c| c.count_ones()).sum();
        prop_assert_eq!(after, before - 10 * full);
    }

    #[test]
    fn prop_garbage_leaves_one_hole_per_row(board in low_board(), lines in 1u32..=6, hole in 0usize..10) {
        let mut raised = board;
        raised.add_garbage(lines, hole);
        for x in 0..Board::WIDTH {
            let bottom = raised.column(x) & low_mask(lines);
            if x == hole {
                prop_assert_eq!(bottom, 0);
            } else {
                prop_assert_eq!(bottom, low_mask(lines));
            }
            prop_assert_eq!(raised.column(x) >> lines, board.column(x));
        }
    }
}
