//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Nothing here mutates
//! state, so every function may be called any number of times with the
//! same answer.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};

use crate::board::Board;
use crate::outcome::{GameStatus, Outcome};
use crate::types::Mark;
use tracing::instrument;

/// Evaluates the board: a completed line, a draw, or neither.
///
/// Lines are scanned rows, then columns, then diagonals; the first complete
/// line decides the winner. That order is also the tie-break on a malformed
/// board carrying two winning lines.
#[instrument]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

/// Evaluates the board from the point of view of the player holding `human`.
pub fn evaluate_for(board: &Board, human: Mark) -> Outcome {
    Outcome::from_status(evaluate(board), human)
}
