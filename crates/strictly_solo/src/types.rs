//! Core domain types for a solo tic-tac-toe game.

use crate::error::{EngineError, InvalidMoveReason};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two marks a player places on the board.
///
/// Parsing is case-insensitive, so `"x"` and `"X"` name the same mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// The X mark.
    X,
    /// The O mark.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Square holds a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Who sits behind a mark: the local human or the scripted opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Seat {
    /// The person at the keyboard.
    Human,
    /// The computer player.
    Opponent,
}

/// A cell address on the 3x3 board.
///
/// Row and column are both in `0..3`; the constructor rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Board side length.
    pub const SIDE: usize = 3;

    /// All nine positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position { row: 0, col: 0 },
        Position { row: 0, col: 1 },
        Position { row: 0, col: 2 },
        Position { row: 1, col: 0 },
        Position { row: 1, col: 1 },
        Position { row: 1, col: 2 },
        Position { row: 2, col: 0 },
        Position { row: 2, col: 1 },
        Position { row: 2, col: 2 },
    ];

    /// Creates a position, rejecting coordinates outside the board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMove`] with [`InvalidMoveReason::OutOfRange`]
    /// when either coordinate is not in `0..3`.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, EngineError> {
        if row >= Self::SIDE || col >= Self::SIDE {
            return Err(EngineError::InvalidMove {
                row,
                col,
                reason: InvalidMoveReason::OutOfRange,
            });
        }
        Ok(Self { row, col })
    }

    /// Creates a position from a row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self.row * Self::SIDE + self.col
    }

    /// Row, counted from the top.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column, counted from the left.
    pub fn col(self) -> usize {
        self.col
    }

    /// Human-readable label, e.g. "Top-left".
    pub fn label(self) -> &'static str {
        const LABELS: [&str; 9] = [
            "Top-left",
            "Top-center",
            "Top-right",
            "Middle-left",
            "Center",
            "Middle-right",
            "Bottom-left",
            "Bottom-center",
            "Bottom-right",
        ];
        LABELS[self.index()]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.row, self.col)
    }
}

impl TryFrom<(usize, usize)> for Position {
    type Error = EngineError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(row, col)
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

/// A mark placed at a position: one entry of the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mark_parses_either_case() {
        assert_eq!(Mark::from_str("x").unwrap(), Mark::X);
        assert_eq!(Mark::from_str("X").unwrap(), Mark::X);
        assert_eq!(Mark::from_str("o").unwrap(), Mark::O);
        assert!(Mark::from_str("").is_err());
    }

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_position_index_round_trip() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), Some(*pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_position_rejects_out_of_range() {
        let err = Position::new(3, 0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidMove {
                reason: InvalidMoveReason::OutOfRange,
                ..
            }
        ));
        assert!(Position::new(0, 7).is_err());
        assert_eq!(Position::new(1, 1).unwrap().label(), "Center");
    }

    #[test]
    fn test_position_serializes_as_pair() {
        let pos = Position::new(2, 1).unwrap();
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, "[2,1]");
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), pos);
        assert!(serde_json::from_str::<Position>("[3,1]").is_err());
    }
}
