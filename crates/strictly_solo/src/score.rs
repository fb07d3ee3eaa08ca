//! Running score across the games of one match.

use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Read-only snapshot of the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Games that ended with a full board and no line.
    pub draws: u32,
}

impl Score {
    /// Wins recorded for a mark.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Total finished games.
    pub fn games_played(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X {} - O {} (draws {})", self.x_wins, self.o_wins, self.draws)
    }
}

/// Accumulates results for the two real marks.
///
/// Counts only grow until [`ScoreTracker::reset`]. Draws live in their own
/// counter and never touch either mark's wins.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    score: Score,
}

impl ScoreTracker {
    /// Creates a tracker with every count at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one win for `mark`.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, mark: Mark) {
        let slot = match mark {
            Mark::X => &mut self.score.x_wins,
            Mark::O => &mut self.score.o_wins,
        };
        *slot = slot.saturating_add(1);
        info!(score = %self.score, "Win recorded");
    }

    /// Adds one drawn game.
    #[instrument(skip(self))]
    pub fn record_draw(&mut self) {
        self.score.draws = self.score.draws.saturating_add(1);
        debug!(score = %self.score, "Draw recorded");
    }

    /// Zeroes every count.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Score reset");
        self.score = Score::default();
    }

    /// Current tally.
    pub fn snapshot(&self) -> Score {
        self.score
    }
}
