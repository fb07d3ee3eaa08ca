//! Strictly Solo - tic-tac-toe against a scripted opponent
//!
//! The game-state engine behind a single-player tic-tac-toe flow. A caller
//! picks the human's mark, submits moves, and renders what comes back;
//! screens, styling and input handling stay on the caller's side.
//!
//! # Architecture
//!
//! - **Board**: fixed 3x3 grid, mutated only by placing a mark in an empty square
//! - **Rules**: pure win/draw evaluation over a board
//! - **Strategy**: the opponent's move choice (uniformly random by default)
//! - **Session**: the turn state machine plus the running score of the match
//! - **Engine**: async task that applies the opponent's move after a
//!   cancellable delay
//!
//! # Example
//!
//! ```no_run
//! use strictly_solo::{Engine, EngineConfig, GameEvent, Mark};
//!
//! # async fn example() -> Result<(), strictly_solo::EngineError> {
//! let (engine, mut events) = Engine::start_session(Mark::X, &EngineConfig::default());
//!
//! let report = engine.submit_human_move(1, 1).await?;
//! println!("{}", report.board());
//!
//! if let Some(GameEvent::OpponentThinking { .. }) = events.recv().await {
//!     if let Some(GameEvent::OpponentMoved(reply)) = events.recv().await {
//!         println!("{}", reply.board());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod engine;
mod error;
mod outcome;
pub mod rules;
mod score;
mod session;
mod strategy;
mod types;

pub use board::Board;
pub use config::EngineConfig;
pub use engine::{Engine, EngineHandle, GameEvent};
pub use error::{ConfigError, EngineError, InvalidMoveReason};
pub use outcome::{GameStatus, Outcome};
pub use score::{Score, ScoreTracker};
pub use session::{GameSession, MoveReport, OpponentTurn, Phase, SessionSnapshot};
pub use strategy::{FirstOpenStrategy, OpponentStrategy, RandomStrategy};
pub use types::{Mark, Move, Position, Seat, Square};
