//! Async driver for a [`GameSession`].
//!
//! The engine is a single task that owns the session. Callers talk to it
//! through an [`EngineHandle`]; it answers each request in the order sent
//! and reports the opponent's moves on an event channel.
//!
//! After a human move that leaves the game open, the engine starts a
//! `tokio::time::Sleep` for the opponent's thinking delay and keeps serving
//! requests while it runs. A reset drops the timer, so the cancelled move
//! is never computed.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::outcome::Outcome;
use crate::score::Score;
use crate::session::{GameSession, MoveReport, OpponentTurn, Phase, SessionSnapshot};
use crate::types::Mark;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Sleep;
use tracing::{debug, info, instrument, warn};

/// Notifications sent from the engine to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The opponent's move is scheduled.
    OpponentThinking {
        /// How long until it lands.
        delay: Duration,
    },
    /// The opponent's move was applied.
    OpponentMoved(MoveReport),
    /// The game just ended, by either player's move.
    GameFinished {
        /// How it ended.
        outcome: Outcome,
        /// Score including this game.
        score: Score,
    },
    /// The board was cleared for a new game.
    GameReset(SessionSnapshot),
}

/// Requests from handles to the engine task.
#[derive(Debug)]
enum Command {
    SubmitMove {
        row: usize,
        col: usize,
        reply: oneshot::Sender<Result<MoveReport, EngineError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Reset {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    RestartMatch {
        human: Mark,
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// An opponent move waiting for its delay to pass.
struct PendingMove {
    ticket: OpponentTurn,
    timer: Pin<Box<Sleep>>,
}

/// Waits for the pending move's timer, or forever if nothing is pending.
async fn until_due(pending: &mut Option<PendingMove>) -> OpponentTurn {
    match pending {
        Some(pending) => {
            pending.timer.as_mut().await;
            pending.ticket
        }
        None => std::future::pending().await,
    }
}

/// Cloneable handle to a running engine.
///
/// The engine shuts down once every handle is dropped.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl EngineHandle {
    /// Submits the human's move at `(row, col)`.
    ///
    /// The report reflects the board right after the human's mark; the
    /// opponent's reply arrives later as [`GameEvent::OpponentMoved`].
    pub async fn submit_human_move(&self, row: usize, col: usize) -> Result<MoveReport, EngineError> {
        self.request(|reply| Command::SubmitMove { row, col, reply })
            .await?
    }

    /// Current score of the match.
    pub async fn current_score(&self) -> Result<Score, EngineError> {
        Ok(*self.snapshot().await?.score())
    }

    /// Current board, phase, outcome and score.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, EngineError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Clears the board for another game, cancelling any pending opponent move.
    pub async fn reset_game(&self) -> Result<SessionSnapshot, EngineError> {
        self.request(|reply| Command::Reset { reply }).await
    }

    /// Starts a new match with the human on `human`; the score goes to zero.
    pub async fn restart_match(&self, human: Mark) -> Result<SessionSnapshot, EngineError> {
        self.request(|reply| Command::RestartMatch { human, reply })
            .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, EngineError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| EngineError::EngineStopped)?;
        response.await.map_err(|_| EngineError::EngineStopped)
    }
}

/// Task that owns a [`GameSession`] and schedules the opponent.
pub struct Engine {
    session: GameSession,
    delay: Duration,
    commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<GameEvent>,
    pending: Option<PendingMove>,
}

impl Engine {
    /// Starts a session against the random opponent described by `config`.
    ///
    /// Must be called inside a Tokio runtime.
    #[instrument(skip(config), fields(delay_ms = config.opponent_delay_ms()))]
    pub fn start_session(
        human: Mark,
        config: &EngineConfig,
    ) -> (EngineHandle, mpsc::UnboundedReceiver<GameEvent>) {
        Self::spawn(
            GameSession::new(human, config.strategy()),
            config.opponent_delay(),
        )
    }

    /// Runs an existing session on a new task.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn spawn(
        session: GameSession,
        delay: Duration,
    ) -> (EngineHandle, mpsc::UnboundedReceiver<GameEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let engine = Self {
            session,
            delay,
            commands: command_rx,
            events: event_tx,
            pending: None,
        };
        tokio::spawn(engine.run());

        (EngineHandle { commands: command_tx }, event_rx)
    }

    /// Serves requests and fires scheduled opponent moves until every
    /// handle is gone.
    async fn run(mut self) {
        info!("Engine started");
        loop {
            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                ticket = until_due(&mut self.pending) => {
                    self.pending = None;
                    self.play_opponent(ticket);
                }
            }
        }
        info!("Engine stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::SubmitMove { row, col, reply } => {
                let result = self.session.submit_human_move(row, col);
                if let Ok(report) = &result {
                    self.after_move(report);
                }
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.session.snapshot());
            }
            Command::Reset { reply } => {
                self.cancel_pending();
                self.session.reset();
                let snapshot = self.session.snapshot();
                self.emit(GameEvent::GameReset(snapshot));
                let _ = reply.send(snapshot);
            }
            Command::RestartMatch { human, reply } => {
                self.cancel_pending();
                self.session.restart_match(human);
                let snapshot = self.session.snapshot();
                self.emit(GameEvent::GameReset(snapshot));
                let _ = reply.send(snapshot);
            }
        }
    }

    /// Schedules the opponent or announces the end of the game.
    fn after_move(&mut self, report: &MoveReport) {
        match report.phase() {
            Phase::AwaitingOpponent => {
                if let Some(ticket) = self.session.pending_opponent_turn() {
                    debug!(delay = ?self.delay, "Scheduling opponent move");
                    self.pending = Some(PendingMove {
                        ticket,
                        timer: Box::pin(tokio::time::sleep(self.delay)),
                    });
                    self.emit(GameEvent::OpponentThinking { delay: self.delay });
                }
            }
            Phase::Finished(outcome) => {
                self.emit(GameEvent::GameFinished {
                    outcome: *outcome,
                    score: self.session.score(),
                });
            }
            Phase::AwaitingHuman => {}
        }
    }

    fn play_opponent(&mut self, ticket: OpponentTurn) {
        match self.session.play_opponent_move(ticket) {
            Ok(report) => {
                self.emit(GameEvent::OpponentMoved(report));
                self.after_move(&report);
            }
            Err(e) => warn!(error = %e, "Opponent move dropped"),
        }
    }

    fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            info!("Cancelled pending opponent move");
        }
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            debug!("No event listener; event dropped");
        }
    }
}
