//! Statistics tracking for a game session

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Summary of a finished (or running) session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Final score
    pub score: u64,
    /// Rows cleared over the whole session
    pub lines_cleared: u64,
    /// Pieces locked into the board
    pub pieces_locked: u64,
    /// Gravity ticks applied by the gravity driver
    pub gravity_ticks: u64,
    /// Commands that changed the game state
    pub commands_applied: u64,
    /// Commands rejected by collision or ignored
    pub commands_rejected: u64,
    /// Wall-clock duration of the session
    pub elapsed: Duration,
}

impl std::fmt::Display for SessionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Score: {}, Lines: {}, Pieces: {}, Ticks: {}, Commands: {} applied / {} rejected, Time: {:.1}s",
            self.score,
            self.lines_cleared,
            self.pieces_locked,
            self.gravity_ticks,
            self.commands_applied,
            self.commands_rejected,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Thread-safe counters shared by the session drivers
///
/// Uses atomic operations so drivers can count without taking the game lock
#[derive(Debug, Clone)]
pub struct StatsTracker {
    gravity_ticks: Arc<AtomicU64>,
    commands_applied: Arc<AtomicU64>,
    commands_rejected: Arc<AtomicU64>,
    start_time: Instant,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            gravity_ticks: Arc::new(AtomicU64::new(0)),
            commands_applied: Arc::new(AtomicU64::new(0)),
            commands_rejected: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn add_gravity_tick(&self) {
        self.gravity_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_command(&self, applied: bool) {
        let counter = if applied {
            &self.commands_applied
        } else {
            &self.commands_rejected
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn gravity_ticks(&self) -> u64 {
        self.gravity_ticks.load(Ordering::Relaxed)
    }

    /// Build a report from the counters plus the game totals
    pub fn report(&self, score: u64, lines_cleared: u64, pieces_locked: u64) -> SessionReport {
        SessionReport {
            score,
            lines_cleared,
            pieces_locked,
            gravity_ticks: self.gravity_ticks.load(Ordering::Relaxed),
            commands_applied: self.commands_applied.load(Ordering::Relaxed),
            commands_rejected: self.commands_rejected.load(Ordering::Relaxed),
            elapsed: self.start_time.elapsed(),
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
