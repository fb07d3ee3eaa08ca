//! The 3x3 board.

use crate::error::{EngineError, InvalidMoveReason};
use crate::types::{Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 3x3 tic-tac-toe board.
///
/// Always fully populated: every square holds [`Square::Empty`] or a mark.
/// The only way to change a square is [`Board::place_mark`], which never
/// overwrites a mark. Reads hand out copies, so callers holding a snapshot
/// cannot reach back into a session's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from squares in row-major order.
    ///
    /// Intended for setting up positions in tests and replays; no
    /// reachability check is made.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Returns the square at a position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Returns the square at `(row, col)`, or `None` off the board.
    pub fn square_at(&self, row: usize, col: usize) -> Option<Square> {
        Position::new(row, col).ok().map(|pos| self.get(pos))
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Places a mark in an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMove`] when the coordinates are off the
    /// board or the square is occupied. The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place_mark(&mut self, row: usize, col: usize, mark: Mark) -> Result<Position, EngineError> {
        let pos = Position::new(row, col)?;
        if let Square::Occupied(existing) = self.get(pos) {
            debug!(%existing, "Square already taken");
            return Err(EngineError::InvalidMove {
                row,
                col,
                reason: InvalidMoveReason::Occupied(existing),
            });
        }
        self.squares[pos.index()] = Square::Occupied(mark);
        Ok(pos)
    }

    /// Places a mark at a validated position.
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), EngineError> {
        self.place_mark(pos.row(), pos.col(), mark).map(|_| ())
    }

    /// Reports whether no empty squares remain.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Empty positions in row-major order.
    pub fn open_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> [Square; 9] {
        self.squares
    }

    /// Counts the squares holding a mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }
}

impl std::fmt::Display for Board {
    /// Renders the grid with 1-9 standing in for empty squares.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..Position::SIDE {
            for col in 0..Position::SIDE {
                let idx = row * Position::SIDE + col;
                match self.squares[idx] {
                    Square::Empty => write!(f, "{}", idx + 1)?,
                    Square::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
