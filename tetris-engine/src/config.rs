//! Configuration for the session scheduler

use std::time::Duration;

use crate::error::{EngineError, Result};

/// Main configuration for a [`Scheduler`](crate::Scheduler)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between two gravity ticks (in milliseconds)
    pub gravity_interval_ms: u64,

    /// How long the gravity driver idles between deadline checks (in milliseconds)
    /// Actual drop timing has up to this much jitter beyond the nominal interval
    pub gravity_poll_ms: u64,

    /// How long the input driver idles when no command is pending (in milliseconds)
    pub input_poll_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            gravity_interval_ms: 500,
            gravity_poll_ms: 50,
            input_poll_ms: 5,
        }
    }
}

impl SchedulerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gravity interval in milliseconds
    pub fn with_gravity_interval_ms(mut self, interval_ms: u64) -> Self {
        self.gravity_interval_ms = interval_ms;
        self
    }

    /// Set the gravity poll granularity in milliseconds
    pub fn with_gravity_poll_ms(mut self, poll_ms: u64) -> Self {
        self.gravity_poll_ms = poll_ms;
        self
    }

    /// Set the input poll interval in milliseconds
    pub fn with_input_poll_ms(mut self, poll_ms: u64) -> Self {
        self.input_poll_ms = poll_ms;
        self
    }

    pub fn gravity_interval(&self) -> Duration {
        Duration::from_millis(self.gravity_interval_ms)
    }

    pub fn gravity_poll(&self) -> Duration {
        Duration::from_millis(self.gravity_poll_ms)
    }

    pub fn input_poll(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }

    /// Check that the drivers can make progress with these values
    pub fn validate(&self) -> Result<()> {
        if self.gravity_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "gravity interval must be greater than zero".to_string(),
            ));
        }
        if self.gravity_poll_ms == 0 || self.input_poll_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "poll intervals must be greater than zero".to_string(),
            ));
        }
        if self.gravity_poll_ms > self.gravity_interval_ms {
            return Err(EngineError::InvalidConfig(format!(
                "gravity poll ({} ms) exceeds gravity interval ({} ms)",
                self.gravity_poll_ms, self.gravity_interval_ms
            )));
        }
        Ok(())
    }
}
