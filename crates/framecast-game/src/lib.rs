//! Game rules for Framecast.
//!
//! Everything in this crate is synchronous and free of I/O. The engine owns
//! the clocks, streams, and sessions; this crate answers "is this move
//! legal", "did anyone win", and "what would the AI play".
//!
//! # Key types
//!
//! - [`SearchBoard`]: the make/undo contract both board shapes implement
//! - [`GravityBoard`] / [`GridBoard`]: the 7×6 drop board and the 3×3 grid
//! - [`Board`]: tagged union over the two, used by sessions
//! - [`WordPuzzle`]: the solo word-guessing game
//! - [`choose_move`]: the AI move engine
//! - [`GameKind`] / [`Difficulty`]: what is being played, and how hard

mod ai;
mod board;
mod error;
mod gravity;
mod grid;
mod kind;
mod puzzle;
mod side;
mod words;

pub use ai::{SCORE_WIN, choose_move, minimax};
pub use board::{Board, SearchBoard};
pub use error::MoveError;
pub use gravity::GravityBoard;
pub use grid::GridBoard;
pub use kind::{Difficulty, GameKind, Position};
pub use puzzle::{MAX_MISSES, WordPuzzle};
pub use side::{Forfeit, Outcome, Side};
pub use words::{WORDS, random_word};
