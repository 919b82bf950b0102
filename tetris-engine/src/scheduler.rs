//! Runs a game session: a gravity driver and an input driver sharing one game

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;

use crate::board::Board;
use crate::command::{Command, InputSource};
use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::game::{Game, Outcome};
use crate::gravity_timer::GravityTimer;
use crate::piece::Piece;
use crate::stats::{SessionReport, StatsTracker};

/// Consumer of game state for display
///
/// Calls are made while the game lock is held, so they arrive in the same
/// order as the transitions they describe.
pub trait Renderer: Send {
    /// Full redraw of the board and score
    fn render(&mut self, board: &Board, score: u64) -> Result<()>;

    /// Draw (`visible`) or erase the cells of `piece` only
    fn render_piece_overlay(&mut self, piece: &Piece, visible: bool) -> Result<()>;

    fn render_game_over(&mut self, score: u64) -> Result<()>;
}

// Everything guarded by the game lock
struct Session<R, G: Rng> {
    game: Game<G>,
    renderer: R,
}

impl<R: Renderer, G: Rng> Session<R, G> {
    fn render_all(&mut self) -> Result<()> {
        self.renderer.render(self.game.board(), self.game.score())?;
        if let Some(piece) = self.game.current() {
            self.renderer.render_piece_overlay(piece, true)?;
        }
        if self.game.is_game_over() {
            self.renderer.render_game_over(self.game.score())?;
        }
        Ok(())
    }

    // Render only what the transition changed
    fn present(&mut self, outcome: &Outcome) -> Result<()> {
        match outcome {
            Outcome::Moved { from, to } => {
                self.renderer.render_piece_overlay(from, false)?;
                self.renderer.render_piece_overlay(to, true)
            }
            Outcome::Locked { .. } => self.render_all(),
            Outcome::GameOver => self.renderer.render_game_over(self.game.score()),
            Outcome::Rejected | Outcome::Ignored => Ok(()),
        }
    }
}

/// Drives one game until it is over
///
/// Gravity and input run as two tokio tasks contending for a single lock
/// around the game. Each task holds the lock for one transition and its
/// rendering, never across a sleep.
pub struct Scheduler<R, G: Rng = StdRng> {
    config: SchedulerConfig,
    session: Arc<Mutex<Session<R, G>>>,
    stats: StatsTracker,
    // Set once the game is over or a driver failed
    finished: Arc<AtomicBool>,
}

impl<R, G> Scheduler<R, G>
where
    R: Renderer + 'static,
    G: Rng + Send + 'static,
{
    pub fn new(config: SchedulerConfig, game: Game<G>, renderer: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            session: Arc::new(Mutex::new(Session { game, renderer })),
            stats: StatsTracker::new(),
            finished: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Run both drivers until the game is over and return the session summary
    pub async fn run<I>(self, input: I) -> Result<SessionReport>
    where
        I: InputSource + 'static,
    {
        {
            let mut session = self.session.lock()?;
            session.render_all()?;
            if session.game.is_game_over() {
                self.finished.store(true, Ordering::Release);
            }
        }
        tracing::info!(
            "Session started, gravity every {} ms",
            self.config.gravity_interval_ms
        );

        let gravity = tokio::spawn(gravity_driver(
            self.session.clone(),
            self.stats.clone(),
            self.finished.clone(),
            self.config.clone(),
        ));
        let commands = tokio::spawn(input_driver(
            self.session.clone(),
            input,
            self.stats.clone(),
            self.finished.clone(),
            self.config.clone(),
        ));
        let (gravity, commands) = tokio::join!(gravity, commands);
        gravity??;
        commands??;

        let session = self.session.lock()?;
        let report = self.stats.report(
            session.game.score(),
            session.game.lines_cleared(),
            session.game.pieces_locked(),
        );
        tracing::info!("Session finished: {}", report);
        Ok(report)
    }
}

// Flags the session as finished when a driver exits for any reason, panics included
struct FinishOnDrop(Arc<AtomicBool>);

impl Drop for FinishOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

// Flag the session as finished whenever a step fails, so the other driver stops too
fn finish_on_error<T>(finished: &AtomicBool, result: Result<T>) -> Result<T> {
    if result.is_err() {
        finished.store(true, Ordering::Release);
    }
    result
}

async fn gravity_driver<R: Renderer, G: Rng>(
    session: Arc<Mutex<Session<R, G>>>,
    stats: StatsTracker,
    finished: Arc<AtomicBool>,
    config: SchedulerConfig,
) -> Result<()> {
    let _guard = FinishOnDrop(finished.clone());
    let mut timer = GravityTimer::new(config.gravity_interval());
    while !finished.load(Ordering::Acquire) {
        if timer.poll(Instant::now()) {
            let over = finish_on_error(&finished, gravity_step(&session, &stats))?;
            if over {
                finished.store(true, Ordering::Release);
                break;
            }
        }
        tokio::time::sleep(config.gravity_poll()).await;
    }
    tracing::debug!("Gravity driver stopped after {} ticks", stats.gravity_ticks());
    Ok(())
}

// One gravity tick under the lock; returns true when the game is over
fn gravity_step<R: Renderer, G: Rng>(
    session: &Mutex<Session<R, G>>,
    stats: &StatsTracker,
) -> Result<bool> {
    let mut session = session.lock()?;
    if session.game.is_game_over() {
        return Ok(true);
    }
    let outcome = session.game.tick();
    stats.add_gravity_tick();
    tracing::trace!("Gravity tick: {:?}", outcome);
    session.present(&outcome)?;
    Ok(session.game.is_game_over())
}

async fn input_driver<R: Renderer, G: Rng, I: InputSource>(
    session: Arc<Mutex<Session<R, G>>>,
    mut input: I,
    stats: StatsTracker,
    finished: Arc<AtomicBool>,
    config: SchedulerConfig,
) -> Result<()> {
    let _guard = FinishOnDrop(finished.clone());
    while !finished.load(Ordering::Acquire) {
        match input.try_next() {
            Some(command) => {
                let over = finish_on_error(&finished, command_step(&session, &stats, command))?;
                if over {
                    finished.store(true, Ordering::Release);
                    break;
                }
                tokio::task::yield_now().await;
            }
            None => tokio::time::sleep(config.input_poll()).await,
        }
    }
    tracing::debug!("Input driver stopped");
    Ok(())
}

// One command under the lock; returns true when the game is over
fn command_step<R: Renderer, G: Rng>(
    session: &Mutex<Session<R, G>>,
    stats: &StatsTracker,
    command: Command,
) -> Result<bool> {
    let mut session = session.lock()?;
    if session.game.is_game_over() {
        return Ok(true);
    }
    let outcome = session.game.apply(command);
    let applied = matches!(
        outcome,
        Outcome::Moved { .. } | Outcome::Locked { .. } | Outcome::GameOver
    );
    stats.add_command(applied);
    if !applied {
        tracing::debug!("Command {:?} had no effect: {:?}", command, outcome);
    }
    session.present(&outcome)?;
    Ok(session.game.is_game_over())
}
