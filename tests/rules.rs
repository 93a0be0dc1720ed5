//! Capture and suicide rule tests.
//!
//! Positions are set up with direct placement and then exercised through the
//! rule-checked entry point, so each test pins one rule in isolation.

use quantum_go::board::{Board, Coord, MoveError, Occupant};
use quantum_go::constants::BOARD_SIZE;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Build a board with the given stones placed directly (no rule checks).
fn setup(stones: &[(Coord, Occupant)]) -> Board {
    let mut board = Board::new(BOARD_SIZE);
    for &(coord, occupant) in stones {
        board.set(coord, occupant);
    }
    board
}

/// Assert that no group on the board is left without liberties.
fn assert_no_dead_groups(board: &Board) {
    for row in 0..board.size() {
        for col in 0..board.size() {
            let coord = (row, col);
            if board.get(coord).is_some_and(Occupant::is_stone) {
                assert!(
                    board.group_liberties(coord) > 0,
                    "group at {coord:?} has no liberties after capture resolution"
                );
            }
        }
    }
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_single_stone_capture() {
    let mut board = setup(&[
        ((2, 2), Occupant::Rules),
        ((1, 2), Occupant::Quantum),
        ((3, 2), Occupant::Quantum),
        ((2, 1), Occupant::Quantum),
    ]);

    let captured = board.try_place((2, 3), Occupant::Quantum).unwrap();
    assert_eq!(captured, vec![(2, 2)]);
    assert_eq!(board.get((2, 2)), Some(Occupant::Empty));
    assert_eq!(board.get((2, 3)), Some(Occupant::Quantum));
    assert_no_dead_groups(&board);
}

#[test]
fn test_multi_stone_group_capture() {
    let mut board = setup(&[
        ((2, 2), Occupant::Rules),
        ((2, 3), Occupant::Rules),
        ((1, 2), Occupant::Quantum),
        ((1, 3), Occupant::Quantum),
        ((3, 2), Occupant::Quantum),
        ((3, 3), Occupant::Quantum),
        ((2, 1), Occupant::Quantum),
    ]);

    let captured = board.try_place((2, 4), Occupant::Quantum).unwrap();
    assert_eq!(captured.len(), 2);
    assert!(captured.contains(&(2, 2)) && captured.contains(&(2, 3)));
    assert_eq!(board.get((2, 2)), Some(Occupant::Empty));
    assert_eq!(board.get((2, 3)), Some(Occupant::Empty));
    assert_no_dead_groups(&board);
}

#[test]
fn test_corner_capture() {
    let mut board = setup(&[((0, 0), Occupant::Rules), ((0, 1), Occupant::Quantum)]);

    let captured = board.try_place((1, 0), Occupant::Quantum).unwrap();
    assert_eq!(captured, vec![(0, 0)]);
    assert_eq!(board.get((0, 0)), Some(Occupant::Empty));
}

#[test]
fn test_shared_last_liberty_captures_both_groups() {
    // two disjoint Rules stones, each down to the same last liberty (2,2)
    let mut board = setup(&[
        ((1, 2), Occupant::Rules),
        ((2, 1), Occupant::Rules),
        ((0, 2), Occupant::Quantum),
        ((1, 1), Occupant::Quantum),
        ((1, 3), Occupant::Quantum),
        ((2, 0), Occupant::Quantum),
        ((3, 1), Occupant::Quantum),
    ]);
    assert_eq!(board.group_liberties((1, 2)), 1);
    assert_eq!(board.group_liberties((2, 1)), 1);

    let captured = board.try_place((2, 2), Occupant::Quantum).unwrap();
    assert_eq!(captured.len(), 2);
    assert!(captured.contains(&(1, 2)) && captured.contains(&(2, 1)));
    assert_no_dead_groups(&board);
}

#[test]
fn test_capture_scan_covers_the_whole_board() {
    // both Rules stones are already surrounded; a placement anywhere else
    // must still clear them, not just groups next to the new stone
    let mut board = setup(&[
        ((1, 1), Occupant::Rules),
        ((3, 3), Occupant::Rules),
        ((0, 1), Occupant::Quantum),
        ((1, 0), Occupant::Quantum),
        ((1, 2), Occupant::Quantum),
        ((2, 1), Occupant::Quantum),
        ((2, 3), Occupant::Quantum),
        ((3, 2), Occupant::Quantum),
        ((3, 4), Occupant::Quantum),
        ((4, 3), Occupant::Quantum),
    ]);

    let captured = board.try_place((2, 2), Occupant::Quantum).unwrap();
    assert_eq!(captured.len(), 2);
    assert!(captured.contains(&(1, 1)) && captured.contains(&(3, 3)));
    assert_no_dead_groups(&board);
}

// =============================================================================
// Suicide
// =============================================================================

#[test]
fn test_suicide_rejected_and_board_unchanged() {
    let mut board = setup(&[
        ((1, 2), Occupant::Rules),
        ((3, 2), Occupant::Rules),
        ((2, 1), Occupant::Rules),
        ((2, 3), Occupant::Rules),
    ]);
    let before = board.clone();

    let result = board.try_place((2, 2), Occupant::Quantum);
    assert_eq!(result, Err(MoveError::Suicide { row: 2, col: 2 }));
    assert_eq!(board, before);
}

#[test]
fn test_corner_suicide_rejected() {
    let mut board = setup(&[
        ((0, 1), Occupant::Rules),
        ((1, 0), Occupant::Rules),
        ((1, 1), Occupant::Rules),
    ]);

    let result = board.try_place((0, 0), Occupant::Quantum);
    assert_eq!(result, Err(MoveError::Suicide { row: 0, col: 0 }));
    assert_eq!(board.get((0, 0)), Some(Occupant::Empty));
}

#[test]
fn test_capture_overrides_suicide() {
    // (2,3) would be suicide, except it takes the last liberty of (2,2)
    let mut board = setup(&[
        ((2, 2), Occupant::Rules),
        ((1, 2), Occupant::Quantum),
        ((3, 2), Occupant::Quantum),
        ((2, 1), Occupant::Quantum),
        ((1, 3), Occupant::Quantum),
        ((3, 3), Occupant::Quantum),
        ((2, 4), Occupant::Quantum),
    ]);

    let captured = board.try_place((2, 3), Occupant::Quantum).unwrap();
    assert_eq!(captured, vec![(2, 2)]);
    assert_eq!(board.get((2, 3)), Some(Occupant::Quantum));
    assert_no_dead_groups(&board);
}

#[test]
fn test_captured_point_reopens_but_stays_suicidal() {
    let mut board = setup(&[
        ((2, 2), Occupant::Rules),
        ((1, 2), Occupant::Quantum),
        ((3, 2), Occupant::Quantum),
        ((2, 1), Occupant::Quantum),
    ]);
    board.try_place((2, 3), Occupant::Quantum).unwrap();

    // the cleared cell is legal again, but playing back into the surrounded
    // point captures nothing and is suicide for Rules
    assert!(board.is_legal((2, 2)));
    let result = board.try_place((2, 2), Occupant::Rules);
    assert_eq!(result, Err(MoveError::Suicide { row: 2, col: 2 }));
}

// =============================================================================
// Liberties
// =============================================================================

#[test]
fn test_atari_group_has_one_liberty() {
    let board = setup(&[
        ((2, 2), Occupant::Rules),
        ((1, 2), Occupant::Quantum),
        ((3, 2), Occupant::Quantum),
        ((2, 1), Occupant::Quantum),
    ]);
    assert_eq!(board.group_liberties((2, 2)), 1);
    assert_eq!(board.get((2, 2)), Some(Occupant::Rules));
}
