//! Move rejection reasons.

/// Why a move was refused.
///
/// The `Display` text is exactly what the offending viewer is shown on
/// their frame, so it is written for players, not for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The mover does not hold the turn.
    #[error("Not your turn.")]
    NotYourTurn,

    /// The position is outside the board or could not be parsed.
    #[error("Invalid move.")]
    OutOfRange,

    /// The target cell already holds a mark.
    #[error("Invalid move.")]
    Occupied,

    /// Every row of the target column is filled.
    #[error("Column full.")]
    ColumnFull,

    /// The guess is not a single letter A–Z.
    #[error("Invalid guess.")]
    InvalidGuess,

    /// The letter was guessed before, right or wrong.
    #[error("Letter already guessed.")]
    AlreadyGuessed,

    /// The game already has an outcome.
    #[error("Game over.")]
    Concluded,
}

impl MoveError {
    /// Whether the move was aimed at a position that is already taken.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied | Self::ColumnFull | Self::AlreadyGuessed)
    }
}
