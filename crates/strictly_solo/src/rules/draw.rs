//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::board::Board;

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board with no winner is a draw.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_draw_detection() {
        let mut board = Board::new();
        // X O X / O X X / O X O
        let marks = [
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::X,
            Mark::O,
            Mark::X,
            Mark::O,
        ];
        for (i, mark) in marks.into_iter().enumerate() {
            board.place_mark(i / 3, i % 3, mark).unwrap();
        }
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place_mark(0, col, Mark::X).unwrap();
        }
        board.place_mark(1, 0, Mark::O).unwrap();
        board.place_mark(1, 1, Mark::O).unwrap();
        assert!(!is_draw(&board));
    }
}
