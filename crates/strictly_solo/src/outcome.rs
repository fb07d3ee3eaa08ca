//! Board status and seat-relative outcomes.

use crate::types::{Mark, Seat};
use serde::{Deserialize, Serialize};

/// What the board says, independent of who is playing which mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// No line is complete and empty squares remain.
    InProgress,
    /// The mark completed a line.
    Won(Mark),
    /// The board is full with no completed line.
    Draw,
}

impl GameStatus {
    /// Returns true once the game can no longer continue.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Result of a game from the human player's point of view.
///
/// Always derived from the board, never stored alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is still going.
    InProgress,
    /// The human completed a line.
    HumanWins,
    /// The opponent completed a line.
    OpponentWins,
    /// Full board, no line.
    Draw,
}

impl Outcome {
    /// Translates a board status using the human's mark.
    pub fn from_status(status: GameStatus, human: Mark) -> Self {
        match status {
            GameStatus::InProgress => Outcome::InProgress,
            GameStatus::Draw => Outcome::Draw,
            GameStatus::Won(mark) if mark == human => Outcome::HumanWins,
            GameStatus::Won(_) => Outcome::OpponentWins,
        }
    }

    /// Returns true once the game can no longer continue.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The seat that won, if any.
    pub fn winner(self) -> Option<Seat> {
        match self {
            Outcome::HumanWins => Some(Seat::Human),
            Outcome::OpponentWins => Some(Seat::Opponent),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::HumanWins => write!(f, "You win"),
            Outcome::OpponentWins => write!(f, "Opponent wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
