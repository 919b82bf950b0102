//! # tetris-engine
//!
//! Game-state engine for a falling-block puzzle game.
//!
//! ## Overview
//!
//! The engine keeps a fixed 12×20 board, spawns tetrominoes at the top, moves
//! them down under gravity and applies player commands. Pieces that come to
//! rest are locked into the board, full rows are cleared and scored at 100
//! points each. The game ends when a new piece cannot be placed or the player
//! quits.
//!
//! ## Key Features
//!
//! - Pure board operations: collision test, lock, single-sweep row clearing
//! - Speculative moves and rotations that never partially mutate state
//! - A scheduler running gravity and input as two tasks behind one lock
//! - Renderer and input source as traits, so front-ends plug in
//!
//! ## Example
//!
//! ```rust,no_run
//! use tetris_engine::{Command, Game, Outcome};
//!
//! let mut game = Game::seeded(42);
//! game.apply(Command::MoveLeft);
//! while let Outcome::Moved { .. } = game.tick() {}
//! println!("Score: {}", game.score());
//! ```

// Module declarations
pub mod board;
pub mod command;
pub mod config;
pub mod error;
pub mod game;
pub mod gravity_timer;
pub mod piece;
pub mod scheduler;
pub mod shape;
pub mod stats;

// Re-exports for convenience
pub use board::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH};
pub use command::{Command, InputSource};
pub use config::SchedulerConfig;
pub use error::{EngineError, Result};
pub use game::{Game, GameStatus, Outcome, Snapshot, POINTS_PER_LINE};
pub use piece::Piece;
pub use scheduler::{Renderer, Scheduler};
pub use shape::{Shape, ShapeKind};
pub use stats::SessionReport;
