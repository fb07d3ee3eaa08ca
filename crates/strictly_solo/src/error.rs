//! Engine error types.

use crate::outcome::Outcome;
use crate::types::Mark;

/// Why a move was refused by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMoveReason {
    /// Row or column is outside `0..3`.
    #[display("coordinates are off the board")]
    OutOfRange,
    /// The square already holds a mark.
    #[display("square is already occupied by {}", _0)]
    Occupied(Mark),
}

/// Errors reported by the game engine.
///
/// Every variant is recoverable: the engine rejects the request and leaves
/// its state untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The target cell is occupied or off the board.
    #[display("Invalid move at ({}, {}): {}", row, col, reason)]
    InvalidMove {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Why the move was refused.
        reason: InvalidMoveReason,
    },

    /// A move was submitted while the opponent is to play.
    #[display("It's not your turn")]
    NotYourTurn,

    /// A move was submitted after the game ended.
    #[display("Game is already over: {}", _0)]
    GameOver(Outcome),

    /// An opponent move scheduled for a turn that no longer exists.
    #[display("Opponent turn is no longer current")]
    StaleTurn,

    /// The opponent was asked to move on a full board.
    #[display("No legal moves remain")]
    NoLegalMoves,

    /// The engine task has shut down and can no longer take requests.
    #[display("Engine has stopped")]
    EngineStopped,
}

impl std::error::Error for EngineError {}

/// Configuration error.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
