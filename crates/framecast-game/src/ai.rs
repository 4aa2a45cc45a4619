//! The AI move engine.
//!
//! With probability `randomness` the AI plays a uniformly random open
//! position. Otherwise it runs a plain minimax over the board:
//!
//! - depth counts plies below the current board, so the AI's candidate
//!   move is depth 1
//! - a leaf the AI wins scores `SCORE_WIN - depth`, a leaf it loses
//!   scores `depth - SCORE_WIN`, a full board scores 0
//! - boards with a [`depth_cap`](SearchBoard::depth_cap) score 0 once the
//!   cap is reached
//! - children are visited in ascending position order and the running
//!   best is only replaced on a strict improvement, so among equal scores
//!   the lowest position wins
//!
//! Every branch is explored with [`SearchBoard::play`] followed by
//! [`SearchBoard::undo`] on the same board. The board handed in is left
//! exactly as it was found.
//!
//! The search is CPU-bound and synchronous. Callers on an async runtime
//! should run it through `spawn_blocking`.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::{SearchBoard, Side};

/// Magnitude of a won leaf before the depth penalty.
pub const SCORE_WIN: i32 = 100;

/// Picks the AI's next position, or `None` if nothing is open.
pub fn choose_move<B, R>(board: &mut B, ai: Side, randomness: f64, rng: &mut R) -> Option<usize>
where
    B: SearchBoard + ?Sized,
    R: Rng + ?Sized,
{
    let open = board.open_positions();
    if open.is_empty() {
        return None;
    }
    if rng.random_bool(randomness.clamp(0.0, 1.0)) {
        let pick = open.choose(rng).copied();
        tracing::trace!(?pick, "AI chose a random move");
        return pick;
    }

    let mut best: Option<(usize, i32)> = None;
    let mut last = None;
    for &position in &open {
        let Ok(cell) = board.play(position, ai) else {
            continue;
        };
        // The AI's own move is the first ply below the current board.
        let score = minimax(board, 1, false, ai);
        board.undo(cell);
        last = Some(position);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((position, score));
        }
    }

    tracing::trace!(?best, "AI search finished");
    best.map(|(position, _)| position)
        .or(last)
        .or_else(|| open.choose(rng).copied())
}

/// Scores `board` from `ai`'s point of view. `maximizing` is true when it
/// is the AI's ply.
pub fn minimax<B>(board: &mut B, depth: u32, maximizing: bool, ai: Side) -> i32
where
    B: SearchBoard + ?Sized,
{
    if let Some(winner) = board.winner() {
        let depth = depth as i32;
        return if winner == ai {
            SCORE_WIN - depth
        } else {
            depth - SCORE_WIN
        };
    }
    if board.is_full() || board.depth_cap().is_some_and(|cap| depth >= cap) {
        return 0;
    }

    let mover = if maximizing { ai } else { ai.other() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for position in board.open_positions() {
        let Ok(cell) = board.play(position, mover) else {
            continue;
        };
        let score = minimax(board, depth + 1, !maximizing, ai);
        board.undo(cell);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
