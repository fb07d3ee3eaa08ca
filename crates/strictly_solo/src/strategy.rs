//! Opponent move selection.

use crate::board::Board;
use crate::error::EngineError;
use crate::types::Position;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

/// Picks the opponent's next square.
///
/// Callers check for a terminal board before asking; a full board is a
/// sequencing defect reported as [`EngineError::NoLegalMoves`].
pub trait OpponentStrategy: Send + std::fmt::Debug {
    /// Selects an empty position on the board.
    fn select_move(&mut self, board: &Board) -> Result<Position, EngineError>;
}

/// Naive opponent: a uniformly random empty square.
///
/// No blocking, no lookahead. This is the whole of its skill.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a strategy with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentStrategy for RandomStrategy {
    #[instrument(skip_all)]
    fn select_move(&mut self, board: &Board) -> Result<Position, EngineError> {
        let open = board.open_positions();
        let Some(pos) = open.choose(&mut self.rng).copied() else {
            warn!("Opponent asked to move on a full board");
            return Err(EngineError::NoLegalMoves);
        };
        debug!(open = open.len(), position = %pos, "Opponent chose square");
        Ok(pos)
    }
}

/// Picks the first empty square in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOpenStrategy;

impl OpponentStrategy for FirstOpenStrategy {
    fn select_move(&mut self, board: &Board) -> Result<Position, EngineError> {
        Position::ALL
            .iter()
            .copied()
            .find(|pos| board.is_empty(*pos))
            .ok_or(EngineError::NoLegalMoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mark, Square};
    use std::collections::HashSet;

    fn board_with_single_gap(gap: usize) -> Board {
        let mut squares = [Square::Occupied(Mark::X); 9];
        for (i, sq) in squares.iter_mut().enumerate() {
            if i % 2 == 1 {
                *sq = Square::Occupied(Mark::O);
            }
        }
        squares[gap] = Square::Empty;
        Board::from_squares(squares)
    }

    #[test]
    fn test_single_gap_is_always_chosen() {
        let mut strategy = RandomStrategy::new();
        for gap in 0..9 {
            let board = board_with_single_gap(gap);
            for _ in 0..10 {
                let pos = strategy.select_move(&board).unwrap();
                assert_eq!(pos.index(), gap);
            }
        }
    }

    #[test]
    fn test_full_board_has_no_legal_moves() {
        let board = Board::from_squares([Square::Occupied(Mark::O); 9]);
        assert_eq!(
            RandomStrategy::seeded(7).select_move(&board),
            Err(EngineError::NoLegalMoves)
        );
        assert_eq!(
            FirstOpenStrategy.select_move(&board),
            Err(EngineError::NoLegalMoves)
        );
    }

    #[test]
    fn test_random_only_picks_empty_squares() {
        let mut board = Board::new();
        board.place_mark(0, 0, Mark::X).unwrap();
        board.place_mark(1, 1, Mark::O).unwrap();
        let mut strategy = RandomStrategy::seeded(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let pos = strategy.select_move(&board).unwrap();
            assert!(board.is_empty(pos));
            seen.insert(pos);
        }
        // Every open square turns up eventually.
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let board = Board::new();
        let mut a = RandomStrategy::seeded(99);
        let mut b = RandomStrategy::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.select_move(&board), b.select_move(&board));
        }
    }

    #[test]
    fn test_first_open() {
        let mut board = Board::new();
        board.place_mark(0, 0, Mark::X).unwrap();
        let pos = FirstOpenStrategy.select_move(&board).unwrap();
        assert_eq!((pos.row(), pos.col()), (0, 1));
    }
}
