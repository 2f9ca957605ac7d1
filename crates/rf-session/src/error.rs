//! Error types for session operations.

use thiserror::Error;

use rf_mechanics::MechError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The mechanics engine rejected the request.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command argument could not be understood.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The sound player failed.
    #[error("sound playback failed: {0}")]
    Sound(String),

    /// A snapshot could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
