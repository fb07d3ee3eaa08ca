//! Turn state machine for one human against the scripted opponent.
//!
//! [`GameSession`] owns the board, the mark assignment, the phase and the
//! running score. It is synchronous: the opponent's "thinking" delay lives
//! in [`Engine`](crate::Engine), which holds an [`OpponentTurn`] ticket
//! while it waits and redeems it with [`GameSession::play_opponent_move`].
//! Tickets expire whenever the session leaves the turn they were issued
//! for, so a move scheduled before a reset can never land afterwards.

use crate::board::Board;
use crate::error::EngineError;
use crate::outcome::Outcome;
use crate::rules;
use crate::score::{Score, ScoreTracker};
use crate::strategy::{OpponentStrategy, RandomStrategy};
use crate::types::{Mark, Move, Position, Seat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to submit a move.
    AwaitingHuman,
    /// The opponent is to move; entered only by a human move.
    AwaitingOpponent,
    /// The game is over. Only a reset leaves this phase.
    Finished(Outcome),
}

impl Phase {
    /// Whose move is next, if anyone's.
    pub fn turn(self) -> Option<Seat> {
        match self {
            Phase::AwaitingHuman => Some(Seat::Human),
            Phase::AwaitingOpponent => Some(Seat::Opponent),
            Phase::Finished(_) => None,
        }
    }
}

/// Permission to play one specific opponent turn.
///
/// Issued when the session enters [`Phase::AwaitingOpponent`]; only the
/// session can mint one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentTurn {
    turn_id: u64,
}

/// State after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MoveReport {
    /// Board after the move.
    board: Board,
    /// Phase after the move.
    phase: Phase,
    /// Outcome evaluated on the new board.
    outcome: Outcome,
    /// The move that was applied.
    last_move: Move,
    /// Who made it.
    seat: Seat,
    /// The completed line when the move won the game.
    winning_line: Option<[Position; 3]>,
}

/// Read-only view of a session between moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current board.
    board: Board,
    /// Current phase.
    phase: Phase,
    /// Outcome evaluated on the current board.
    outcome: Outcome,
    /// The human's mark.
    human: Mark,
    /// Running score for the match.
    score: Score,
}

/// A match between the human and the scripted opponent.
///
/// Holds the current game and the score of every game played since the
/// match started. [`GameSession::reset`] starts a new game in the same
/// match; [`GameSession::restart_match`] also clears the score.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    human: Mark,
    phase: Phase,
    history: Vec<Move>,
    score: ScoreTracker,
    strategy: Box<dyn OpponentStrategy>,
    turn_id: u64,
}

impl GameSession {
    /// Starts a session with the human holding `human`.
    ///
    /// The human always moves first, whichever mark they chose.
    #[instrument(skip(strategy))]
    pub fn new(human: Mark, strategy: impl OpponentStrategy + 'static) -> Self {
        info!(%human, "Starting session");
        Self {
            board: Board::new(),
            human,
            phase: Phase::AwaitingHuman,
            history: Vec::new(),
            score: ScoreTracker::new(),
            strategy: Box::new(strategy),
            turn_id: 0,
        }
    }

    /// Starts a session against the random opponent.
    pub fn with_random_opponent(human: Mark) -> Self {
        Self::new(human, RandomStrategy::new())
    }

    /// The human's mark.
    pub fn human_mark(&self) -> Mark {
        self.human
    }

    /// The opponent's mark.
    pub fn opponent_mark(&self) -> Mark {
        self.human.opponent()
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome, recomputed from the board.
    pub fn outcome(&self) -> Outcome {
        rules::evaluate_for(&self.board, self.human)
    }

    /// Moves of the current game in play order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Running score for the match.
    pub fn score(&self) -> Score {
        self.score.snapshot()
    }

    /// Everything a caller needs to redraw.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            phase: self.phase,
            outcome: self.outcome(),
            human: self.human,
            score: self.score(),
        }
    }

    /// The ticket for the opponent's pending turn, if it is the opponent's move.
    pub fn pending_opponent_turn(&self) -> Option<OpponentTurn> {
        (self.phase == Phase::AwaitingOpponent).then_some(OpponentTurn {
            turn_id: self.turn_id,
        })
    }

    /// Places the human's mark.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotYourTurn`] while the opponent is to move
    /// - [`EngineError::GameOver`] once the game has finished
    /// - [`EngineError::InvalidMove`] for an occupied or off-board cell
    ///
    /// The board is unchanged on every error.
    #[instrument(skip(self), fields(human = %self.human, phase = ?self.phase))]
    pub fn submit_human_move(&mut self, row: usize, col: usize) -> Result<MoveReport, EngineError> {
        match self.phase {
            Phase::AwaitingHuman => {}
            Phase::AwaitingOpponent => {
                warn!("Human moved during opponent's turn");
                return Err(EngineError::NotYourTurn);
            }
            Phase::Finished(outcome) => {
                warn!(%outcome, "Human moved after game ended");
                return Err(EngineError::GameOver(outcome));
            }
        }

        let position = self.board.place_mark(row, col, self.human).inspect_err(|e| {
            warn!(error = %e, "Rejected human move");
        })?;
        Ok(self.advance(Move::new(self.human, position), Seat::Human))
    }

    /// Lets the opponent pick and place its mark.
    ///
    /// # Errors
    ///
    /// - [`EngineError::StaleTurn`] when the ticket belongs to an earlier turn
    /// - [`EngineError::NotYourTurn`] / [`EngineError::GameOver`] outside the
    ///   opponent's turn
    /// - [`EngineError::NoLegalMoves`] if the strategy finds no empty square
    #[instrument(skip(self), fields(opponent = %self.opponent_mark()))]
    pub fn play_opponent_move(&mut self, ticket: OpponentTurn) -> Result<MoveReport, EngineError> {
        if ticket.turn_id != self.turn_id {
            debug!(ticket = ticket.turn_id, current = self.turn_id, "Dropping stale opponent turn");
            return Err(EngineError::StaleTurn);
        }
        match self.phase {
            Phase::AwaitingOpponent => {}
            Phase::AwaitingHuman => return Err(EngineError::NotYourTurn),
            Phase::Finished(outcome) => return Err(EngineError::GameOver(outcome)),
        }

        let position = self.strategy.select_move(&self.board)?;
        let mark = self.opponent_mark();
        self.board.place(position, mark)?;
        Ok(self.advance(Move::new(mark, position), Seat::Opponent))
    }

    /// Clears the board for another game. The score is kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves = self.history.len(), "Resetting game");
        self.board = Board::new();
        self.history.clear();
        self.phase = Phase::AwaitingHuman;
        // Expire any ticket handed out for the abandoned game.
        self.turn_id += 1;
    }

    /// Starts a fresh match: new game, new mark, score back to zero.
    #[instrument(skip(self))]
    pub fn restart_match(&mut self, human: Mark) {
        self.reset();
        self.human = human;
        self.score.reset();
    }

    /// Records a move already placed on the board and moves the phase on.
    fn advance(&mut self, mv: Move, seat: Seat) -> MoveReport {
        self.history.push(mv);
        let outcome = self.outcome();
        debug!(%mv, ?outcome, "Move applied");

        self.phase = if outcome.is_terminal() {
            self.record(outcome);
            Phase::Finished(outcome)
        } else {
            match seat {
                Seat::Human => {
                    self.turn_id += 1;
                    Phase::AwaitingOpponent
                }
                Seat::Opponent => Phase::AwaitingHuman,
            }
        };

        MoveReport {
            board: self.board,
            phase: self.phase,
            outcome,
            last_move: mv,
            seat,
            winning_line: rules::winning_line(&self.board).map(|(_, line)| line),
        }
    }

    /// Feeds a terminal outcome into the score. Called once per game, on
    /// the transition into [`Phase::Finished`].
    fn record(&mut self, outcome: Outcome) {
        info!(%outcome, "Game finished");
        match outcome {
            Outcome::HumanWins => self.score.record_win(self.human),
            Outcome::OpponentWins => self.score.record_win(self.opponent_mark()),
            Outcome::Draw => self.score.record_draw(),
            Outcome::InProgress => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::FirstOpenStrategy;
    use crate::types::Square;

    #[test]
    fn test_initial_state() {
        let session = GameSession::new(Mark::O, FirstOpenStrategy);
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert_eq!(session.phase().turn(), Some(Seat::Human));
        assert_eq!(session.board(), Board::new());
        assert_eq!(session.outcome(), Outcome::InProgress);
        assert!(session.pending_opponent_turn().is_none());
    }

    #[test]
    fn test_human_move_hands_turn_to_opponent() {
        let mut session = GameSession::new(Mark::X, FirstOpenStrategy);
        let report = session.submit_human_move(1, 1).unwrap();
        assert_eq!(*report.phase(), Phase::AwaitingOpponent);
        assert_eq!(*report.seat(), Seat::Human);
        assert_eq!(report.board().square_at(1, 1), Some(Square::Occupied(Mark::X)));
        assert!(session.pending_opponent_turn().is_some());
    }

    #[test]
    fn test_move_during_opponent_turn_is_rejected() {
        let mut session = GameSession::new(Mark::X, FirstOpenStrategy);
        session.submit_human_move(1, 1).unwrap();
        let before = session.board();

        assert_eq!(session.submit_human_move(0, 0), Err(EngineError::NotYourTurn));
        assert_eq!(session.board(), before);
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut session = GameSession::new(Mark::X, FirstOpenStrategy);
        assert!(matches!(
            session.submit_human_move(5, 5),
            Err(EngineError::InvalidMove { .. })
        ));
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_opponent_uses_other_mark() {
        let mut session = GameSession::new(Mark::O, FirstOpenStrategy);
        session.submit_human_move(2, 2).unwrap();
        let ticket = session.pending_opponent_turn().unwrap();
        let report = session.play_opponent_move(ticket).unwrap();
        assert_eq!(report.last_move().mark, Mark::X);
        assert_eq!(report.last_move().position.index(), 0);
        assert_eq!(*report.phase(), Phase::AwaitingHuman);
    }

    #[test]
    fn test_ticket_cannot_be_redeemed_twice() {
        let mut session = GameSession::new(Mark::X, FirstOpenStrategy);
        session.submit_human_move(2, 2).unwrap();
        let ticket = session.pending_opponent_turn().unwrap();
        session.play_opponent_move(ticket).unwrap();
        session.submit_human_move(2, 1).unwrap();
        assert_eq!(session.play_opponent_move(ticket), Err(EngineError::StaleTurn));
    }

    #[test]
    fn test_reset_expires_pending_ticket() {
        let mut session = GameSession::new(Mark::X, FirstOpenStrategy);
        session.submit_human_move(0, 0).unwrap();
        let ticket = session.pending_opponent_turn().unwrap();

        session.reset();
        session.submit_human_move(1, 1).unwrap();

        assert_eq!(session.play_opponent_move(ticket), Err(EngineError::StaleTurn));
        assert_eq!(session.board().count(Mark::O), 0);
    }

    /// Plays a fixed list of squares, in order.
    #[derive(Debug)]
    struct Scripted(Vec<(usize, usize)>);

    impl OpponentStrategy for Scripted {
        fn select_move(&mut self, _board: &Board) -> Result<Position, EngineError> {
            if self.0.is_empty() {
                return Err(EngineError::NoLegalMoves);
            }
            let (row, col) = self.0.remove(0);
            Position::new(row, col)
        }
    }

    fn opponent_turn(session: &mut GameSession) -> MoveReport {
        let ticket = session.pending_opponent_turn().unwrap();
        session.play_opponent_move(ticket).unwrap()
    }

    #[test]
    fn test_human_win_scores_once() {
        let mut session = GameSession::new(Mark::X, Scripted(vec![(1, 0), (1, 1)]));
        session.submit_human_move(0, 0).unwrap();
        opponent_turn(&mut session);
        session.submit_human_move(0, 1).unwrap();
        opponent_turn(&mut session);
        let report = session.submit_human_move(0, 2).unwrap();

        assert_eq!(*report.outcome(), Outcome::HumanWins);
        assert_eq!(*report.phase(), Phase::Finished(Outcome::HumanWins));
        assert_eq!(report.winning_line().map(|line| line[2].index()), Some(2));
        assert_eq!(session.score().wins(Mark::X), 1);
        assert!(session.pending_opponent_turn().is_none());

        assert_eq!(
            session.submit_human_move(2, 2),
            Err(EngineError::GameOver(Outcome::HumanWins))
        );
        assert_eq!(session.score().wins(Mark::X), 1);
    }

    #[test]
    fn test_opponent_win_scores_opponent_mark() {
        let mut session = GameSession::new(Mark::O, Scripted(vec![(0, 0), (1, 1), (2, 2)]));
        session.submit_human_move(0, 1).unwrap();
        opponent_turn(&mut session);
        session.submit_human_move(0, 2).unwrap();
        opponent_turn(&mut session);
        session.submit_human_move(1, 0).unwrap();
        let report = opponent_turn(&mut session);

        assert_eq!(*report.outcome(), Outcome::OpponentWins);
        assert_eq!(session.score().wins(Mark::X), 1);
        assert_eq!(session.score().wins(Mark::O), 0);
    }

    #[test]
    fn test_draw_is_tallied_separately() {
        // X O X / X O O / O X X with the human as X.
        let mut session =
            GameSession::new(Mark::X, Scripted(vec![(0, 1), (1, 1), (1, 2), (2, 0)]));
        for (row, col) in [(0, 0), (0, 2), (1, 0), (2, 1)] {
            session.submit_human_move(row, col).unwrap();
            opponent_turn(&mut session);
        }
        let report = session.submit_human_move(2, 2).unwrap();

        assert_eq!(*report.phase(), Phase::Finished(Outcome::Draw));
        let score = session.score();
        assert_eq!((score.x_wins, score.o_wins, score.draws), (0, 0, 1));
    }

    #[test]
    fn test_reset_keeps_score_and_restart_clears_it() {
        let mut session = GameSession::new(Mark::X, Scripted(vec![(1, 0), (1, 1)]));
        session.submit_human_move(0, 0).unwrap();
        opponent_turn(&mut session);
        session.submit_human_move(0, 1).unwrap();
        opponent_turn(&mut session);
        session.submit_human_move(0, 2).unwrap();

        session.reset();
        assert_eq!(session.phase(), Phase::AwaitingHuman);
        assert_eq!(session.board(), Board::new());
        assert!(session.history().is_empty());
        assert_eq!(session.score().wins(Mark::X), 1);

        session.restart_match(Mark::O);
        assert_eq!(session.human_mark(), Mark::O);
        assert_eq!(session.score(), Score::default());
    }
}
