//! Game kinds, difficulty levels, and position parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Board, GravityBoard, GridBoard, MoveError, Side};

/// Which game an engine instance hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    /// Drop four in a row on the 7×6 board.
    #[default]
    ConnectFour,
    /// Three in a row on the 3×3 grid.
    TicTacToe,
    /// Guess the secret word one letter at a time. Solo only.
    WordGuess,
}

/// A parsed move target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A column (drop board) or cell (grid).
    Index(usize),
    /// An uppercase letter A–Z.
    Letter(char),
}

impl GameKind {
    /// A fresh board, or `None` for the word game.
    pub fn new_board(self) -> Option<Board> {
        match self {
            Self::ConnectFour => Some(Board::Gravity(GravityBoard::new())),
            Self::TicTacToe => Some(Board::Grid(GridBoard::new())),
            Self::WordGuess => None,
        }
    }

    /// Whether two humans can be paired for this game.
    pub fn supports_multiplayer(self) -> bool {
        !matches!(self, Self::WordGuess)
    }

    /// The mark each side draws with.
    pub fn mark(self, side: Side) -> char {
        match (self, side) {
            (Self::ConnectFour, Side::First) => 'R',
            (Self::ConnectFour, Side::Second) => 'Y',
            (_, Side::First) => 'X',
            (_, Side::Second) => 'O',
        }
    }

    /// Parses the raw positional parameter of a move request.
    ///
    /// # Errors
    /// [`MoveError::OutOfRange`] for a board index that is not a number in
    /// range, [`MoveError::InvalidGuess`] for anything but one letter.
    pub fn parse_position(self, raw: &str) -> Result<Position, MoveError> {
        let raw = raw.trim();
        match self {
            Self::ConnectFour | Self::TicTacToe => {
                let limit = match self {
                    Self::ConnectFour => GravityBoard::COLUMNS,
                    _ => GridBoard::CELLS,
                };
                let index: usize = raw.parse().map_err(|_| MoveError::OutOfRange)?;
                if index >= limit {
                    return Err(MoveError::OutOfRange);
                }
                Ok(Position::Index(index))
            }
            Self::WordGuess => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        Ok(Position::Letter(c.to_ascii_uppercase()))
                    }
                    _ => Err(MoveError::InvalidGuess),
                }
            }
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConnectFour => "connect-four",
            Self::TicTacToe => "tic-tac-toe",
            Self::WordGuess => "word-guess",
        })
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "connect-four" | "connect4" => Ok(Self::ConnectFour),
            "tic-tac-toe" | "ttt" => Ok(Self::TicTacToe),
            "word-guess" | "hangman" => Ok(Self::WordGuess),
            other => Err(format!("unknown game: {other}")),
        }
    }
}

/// How often the AI abandons search for a random move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    /// Probability of a uniformly random move instead of a searched one.
    pub fn randomness(self) -> f64 {
        match self {
            Self::Easy => 0.5,
            Self::Medium => 0.3,
            Self::Hard => 0.1,
            Self::Impossible => 0.0,
        }
    }

    /// Maps a request's difficulty selector. Missing or unrecognized
    /// selectors fall back to [`Difficulty::Medium`].
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(str::to_ascii_lowercase).as_deref() {
            Some("easy") => Self::Easy,
            Some("hard") => Self::Hard,
            Some("impossible") => Self::Impossible,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Impossible => "impossible",
        })
    }
}
