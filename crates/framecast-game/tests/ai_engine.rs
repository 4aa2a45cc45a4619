//! Behavioural tests for the AI move engine against full boards.

use framecast_game::{GravityBoard, GridBoard, SearchBoard, Side, choose_move};
use rand::SeedableRng;
use rand::rngs::StdRng;

// =========================================================================
// Helpers
// =========================================================================

/// Walks every legal line of play where the human moves first and the AI
/// answers with zero randomness. Returns the number of finished games and
/// panics on the first one the AI loses.
fn explore(board: &mut GridBoard, rng: &mut StdRng) -> usize {
    if let Some(winner) = board.winner() {
        assert_eq!(winner, Side::Second, "AI lost on {board:?}");
        return 1;
    }
    if board.is_full() {
        return 1;
    }

    let mut games = 0;
    for human in board.open_positions() {
        let human_cell = board.play(human, Side::First).unwrap();
        if board.winner().is_some() || board.is_full() {
            games += explore(board, rng);
        } else {
            let reply = choose_move(board, Side::Second, 0.0, rng).expect("open cell");
            let ai_cell = board.play(reply, Side::Second).unwrap();
            games += explore(board, rng);
            board.undo(ai_cell);
        }
        board.undo(human_cell);
    }
    games
}

// =========================================================================
// Grid
// =========================================================================

#[test]
fn test_grid_ai_without_randomness_never_loses() {
    let mut board = GridBoard::new();
    let mut rng = StdRng::seed_from_u64(1);
    let games = explore(&mut board, &mut rng);
    assert!(games > 0);
    assert_eq!(board, GridBoard::new());
}

// =========================================================================
// Gravity board
// =========================================================================

#[test]
fn test_gravity_ai_completes_vertical_four() {
    let mut board = GravityBoard::new();
    for (col, side) in [
        (5, Side::Second),
        (0, Side::First),
        (5, Side::Second),
        (1, Side::First),
        (5, Side::Second),
        (0, Side::First),
    ] {
        board.play(col, side).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(choose_move(&mut board, Side::Second, 0.0, &mut rng), Some(5));
}

#[test]
fn test_gravity_ai_blocks_open_three() {
    // Bottom row: R R R . . . .   (R = human, first)
    let mut board = GravityBoard::new();
    for (col, side) in [
        (0, Side::First),
        (0, Side::Second),
        (1, Side::First),
        (1, Side::Second),
        (2, Side::First),
    ] {
        board.play(col, side).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(choose_move(&mut board, Side::Second, 0.0, &mut rng), Some(3));
}

#[test]
fn test_gravity_ai_skips_full_column() {
    let mut board = GravityBoard::new();
    for i in 0..GravityBoard::ROWS {
        let side = if i % 2 == 0 { Side::First } else { Side::Second };
        board.play(0, side).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..20 {
        let pick = choose_move(&mut board, Side::Second, 1.0, &mut rng).unwrap();
        assert_ne!(pick, 0);
    }
}
