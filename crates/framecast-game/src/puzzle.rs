//! The solo word-guessing game.
//!
//! The human is always [`Side::First`]. The AI never guesses; it "wins"
//! when the human runs out of misses or out of time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{MoveError, Outcome, Side};

/// Distinct wrong letters that lose the puzzle.
pub const MAX_MISSES: usize = 6;

/// A secret word and the letters guessed against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPuzzle {
    word: String,
    correct: BTreeSet<char>,
    incorrect: BTreeSet<char>,
}

impl WordPuzzle {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into().to_ascii_uppercase(),
            correct: BTreeSet::new(),
            incorrect: BTreeSet::new(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn correct(&self) -> &BTreeSet<char> {
        &self.correct
    }

    pub fn incorrect(&self) -> &BTreeSet<char> {
        &self.incorrect
    }

    pub fn misses(&self) -> usize {
        self.incorrect.len()
    }

    /// Records one guess. Returns whether the letter is in the word.
    ///
    /// # Errors
    /// - [`MoveError::Concluded`] once the puzzle is solved or lost
    /// - [`MoveError::InvalidGuess`] for anything but A–Z (either case)
    /// - [`MoveError::AlreadyGuessed`] for a repeat; nothing is recorded
    pub fn guess(&mut self, letter: char) -> Result<bool, MoveError> {
        if self.outcome().is_some() {
            return Err(MoveError::Concluded);
        }
        if !letter.is_ascii_alphabetic() {
            return Err(MoveError::InvalidGuess);
        }
        let letter = letter.to_ascii_uppercase();
        if self.correct.contains(&letter) || self.incorrect.contains(&letter) {
            return Err(MoveError::AlreadyGuessed);
        }
        let hit = self.word.contains(letter);
        if hit {
            self.correct.insert(letter);
        } else {
            self.incorrect.insert(letter);
        }
        Ok(hit)
    }

    pub fn is_solved(&self) -> bool {
        self.word.chars().all(|c| self.correct.contains(&c))
    }

    pub fn is_lost(&self) -> bool {
        self.incorrect.len() >= MAX_MISSES
    }

    /// `Win(First)` when solved, `Win(Second)` when out of misses.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_lost() {
            Some(Outcome::Win(Side::Second))
        } else if self.is_solved() {
            Some(Outcome::Win(Side::First))
        } else {
            None
        }
    }

    /// The word with unguessed letters hidden: `K _ T T _ E`.
    pub fn masked(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.correct.contains(&c) { c } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Starts over with a new secret word.
    pub fn reset(&mut self, word: impl Into<String>) {
        *self = Self::new(word);
    }
}
