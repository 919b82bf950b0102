/// Error types for the tetris-engine library
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while running a game session
///
/// Rejected moves and a blocked spawn are game rules, not errors, and never
/// show up here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Scheduler configuration is unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A driver panicked while holding the game lock
    #[error("Game lock poisoned")]
    LockPoisoned,

    /// A driver task could not be joined
    #[error("Driver error: {0}")]
    Driver(String),

    /// Renderer failure that is not an IO error
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl<T> From<std::sync::PoisonError<T>> for EngineError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        EngineError::LockPoisoned
    }
}

impl From<tokio::task::JoinError> for EngineError {
    fn from(e: tokio::task::JoinError) -> Self {
        EngineError::Driver(e.to_string())
    }
}
