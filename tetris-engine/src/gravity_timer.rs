use std::time::{Duration, Instant};

/// Decides when the next gravity tick is due
///
/// The timer is checked at a coarse poll rate, so a drop happens on the first
/// check at or after the deadline, not exactly on it. I.e. with a 500 ms
/// interval polled every 50 ms, drops land 500..550 ms apart.
#[derive(Debug, Clone)]
pub struct GravityTimer {
    interval: Duration,
    last_drop: Instant,
}

impl GravityTimer {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, now: Instant) -> Self {
        GravityTimer {
            interval,
            last_drop: now,
        }
    }

    /// Returns true if a tick is due at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_drop) >= self.interval
    }

    /// Restart the interval from `now`
    pub fn reset(&mut self, now: Instant) {
        self.last_drop = now;
    }

    /// Check at `now` and restart the interval when a tick is due
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.reset(now);
            true
        } else {
            false
        }
    }
}
