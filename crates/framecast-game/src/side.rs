//! Sides and outcomes.

use serde::{Deserialize, Serialize};

/// One of the two parties in a session.
///
/// `First` always moves first. In a multiplayer session that is the
/// client who was waiting in the queue; in a solo session it is the
/// human, and the AI plays `Second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The opposing side.
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    /// 0 for `First`, 1 for `Second`. Handy for indexing seat arrays.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    pub const BOTH: [Side; 2] = [Side::First, Side::Second];
}

/// What ended a game without a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Forfeit {
    /// The turn clock ran out.
    Timeout,
    /// The other party's stream was lost.
    Disconnect,
}

/// Terminal value of a session. Once set it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Won on the board.
    Win(Side),
    /// Board filled with no winner, or the clock expired before any move.
    Draw,
    /// Won because the opponent timed out or left.
    DefaultWin(Side, Forfeit),
}

impl Outcome {
    /// The winning side, if there is one.
    pub fn winner(self) -> Option<Side> {
        match self {
            Self::Win(side) | Self::DefaultWin(side, _) => Some(side),
            Self::Draw => None,
        }
    }

    /// Player-facing summary from `viewer`'s point of view.
    pub fn message_for(self, viewer: Side) -> &'static str {
        match self {
            Self::Draw => "It's a draw!",
            Self::Win(side) if side == viewer => "You win!",
            Self::Win(_) => "You lose!",
            Self::DefaultWin(side, Forfeit::Disconnect) if side == viewer => {
                "Opponent disconnected. You win by default."
            }
            Self::DefaultWin(side, Forfeit::Timeout) if side == viewer => {
                "You win by default!"
            }
            Self::DefaultWin(..) => "You lose!",
        }
    }
}
