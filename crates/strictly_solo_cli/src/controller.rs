//! Screen flow: pick a mark, wait for a match, play, see the result.

use crate::render;
use crate::screen::{PickInput, PlayInput, RecordInput};
use anyhow::{Context, Result, bail};
use std::time::Duration;
use strictly_solo::{
    Engine, EngineConfig, EngineError, EngineHandle, GameEvent, Mark, MoveReport, Outcome, Phase,
    Seat,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument};

type Input = Lines<BufReader<Stdin>>;

/// Where a finished screen sends the player next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenTransition {
    /// Show the result screen for this outcome.
    GoToRecord(Outcome),
    /// Leave the program.
    Quit,
}

/// Drives the terminal flow around one engine.
pub struct Controller {
    config: EngineConfig,
    matchmaking_delay: Duration,
    preset_mark: Option<Mark>,
    engine: Option<(EngineHandle, UnboundedReceiver<GameEvent>)>,
}

impl Controller {
    /// Creates a controller. With `preset_mark`, the first selection
    /// screen is skipped.
    pub fn new(config: EngineConfig, matchmaking_delay: Duration, preset_mark: Option<Mark>) -> Self {
        Self {
            config,
            matchmaking_delay,
            preset_mark,
            engine: None,
        }
    }

    /// Runs until the player quits or stdin closes.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting screen flow");
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        'matches: loop {
            let human = match self.preset_mark.take() {
                Some(mark) => mark,
                None => match pick_player(&mut input).await? {
                    Some(mark) => mark,
                    None => break,
                },
            };

            println!("{}", render::matchmaking(human));
            tokio::time::sleep(self.matchmaking_delay).await;

            let (engine, events) = self.start_match(human).await?;

            loop {
                let outcome = match play(engine, events, &mut input, human).await? {
                    ScreenTransition::GoToRecord(outcome) => outcome,
                    ScreenTransition::Quit => break 'matches,
                };

                println!("{}", render::outcome(outcome));
                println!("{}", render::score(&engine.current_score().await?, human));
                println!("{}", render::record_prompt());

                match record_choice(&mut input).await? {
                    RecordInput::PlayAgain => {
                        engine.reset_game().await?;
                        drain(events);
                    }
                    RecordInput::NewMatch => continue 'matches,
                    RecordInput::Quit => break 'matches,
                }
            }
        }

        info!("Screen flow finished");
        Ok(())
    }

    /// Starts the engine on first use; later matches restart it.
    async fn start_match(
        &mut self,
        human: Mark,
    ) -> Result<(&EngineHandle, &mut UnboundedReceiver<GameEvent>)> {
        match &mut self.engine {
            Some((engine, events)) => {
                engine.restart_match(human).await?;
                drain(events);
            }
            None => {
                self.engine = Some(Engine::start_session(human, &self.config));
            }
        }
        let (engine, events) = self.engine.as_mut().context("engine not started")?;
        Ok((&*engine, events))
    }
}

/// Player selection screen. `None` means quit.
async fn pick_player(input: &mut Input) -> Result<Option<Mark>> {
    println!("{}", render::pick_player());
    while let Some(line) = input.next_line().await? {
        match PickInput::parse(&line) {
            Some(PickInput::Mark(mark)) => return Ok(Some(mark)),
            Some(PickInput::Quit) => return Ok(None),
            None => println!("{}", render::pick_player()),
        }
    }
    Ok(None)
}

/// Result screen choice. End of input counts as quitting.
async fn record_choice(input: &mut Input) -> Result<RecordInput> {
    while let Some(line) = input.next_line().await? {
        match RecordInput::parse(&line) {
            Some(choice) => return Ok(choice),
            None => println!("{}", render::record_prompt()),
        }
    }
    Ok(RecordInput::Quit)
}

/// One game, from an empty board to a finished phase.
async fn play(
    engine: &EngineHandle,
    events: &mut UnboundedReceiver<GameEvent>,
    input: &mut Input,
    human: Mark,
) -> Result<ScreenTransition> {
    println!("{}", render::board(engine.snapshot().await?.board()));
    println!("{}", render::play_help());

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(ScreenTransition::Quit);
                };
                match PlayInput::parse(&line) {
                    Some(PlayInput::Cell { row, col }) => {
                        match engine.submit_human_move(row, col).await {
                            Ok(report) => {
                                if let Some(outcome) = show_move(&report, human) {
                                    return Ok(ScreenTransition::GoToRecord(outcome));
                                }
                            }
                            Err(EngineError::EngineStopped) => bail!("engine stopped mid-game"),
                            Err(e) => println!("{}", e),
                        }
                    }
                    Some(PlayInput::Score) => {
                        println!("{}", render::score(&engine.current_score().await?, human));
                    }
                    Some(PlayInput::Reset) => {
                        let snapshot = engine.reset_game().await?;
                        drain(events);
                        println!("{}", render::board(snapshot.board()));
                    }
                    Some(PlayInput::Quit) => return Ok(ScreenTransition::Quit),
                    None => println!("{}", render::play_help()),
                }
            }
            event = events.recv() => {
                match event {
                    Some(GameEvent::OpponentThinking { delay }) => {
                        debug!(?delay, "Opponent thinking");
                        println!("Opponent is thinking...");
                    }
                    Some(GameEvent::OpponentMoved(report)) => {
                        if let Some(outcome) = show_move(&report, human) {
                            return Ok(ScreenTransition::GoToRecord(outcome));
                        }
                    }
                    Some(GameEvent::GameFinished { .. } | GameEvent::GameReset(_)) => {}
                    None => bail!("engine stopped mid-game"),
                }
            }
        }
    }
}

/// Prints a move and the new board; returns the outcome if the game ended.
fn show_move(report: &MoveReport, human: Mark) -> Option<Outcome> {
    let who = match report.seat() {
        Seat::Human => "You",
        Seat::Opponent => "Opponent",
    };
    let mv = report.last_move();
    println!("{}", render::move_line(who, mv.mark, mv.position));
    println!("{}", render::board(report.board()));
    debug!(%human, phase = ?report.phase(), "Board updated");

    match report.phase() {
        Phase::Finished(outcome) => Some(*outcome),
        Phase::AwaitingHuman | Phase::AwaitingOpponent => None,
    }
}

/// Discards events left over from an abandoned game.
fn drain(events: &mut UnboundedReceiver<GameEvent>) {
    while let Ok(event) = events.try_recv() {
        debug!(?event, "Dropping stale event");
    }
}
