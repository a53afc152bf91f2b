//! Playback error types.

use sortlab_core::CoreError;

/// Playback result type
pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// Playback errors
///
/// None of these are fatal; a rejected call leaves every state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// Operation needs playback to be paused
    #[error("{operation} is not allowed while playing")]
    Playing {
        /// Rejected operation
        operation: &'static str,
    },

    /// Participant selection not allowed in the current mode
    #[error("Invalid participants: {reason}")]
    InvalidParticipants {
        /// Why it was rejected
        reason: String,
    },

    /// Config file could not be read
    #[error("Failed to read config {path}: {reason}")]
    ConfigIo {
        /// Path that failed
        path: String,
        /// Underlying I/O error text
        reason: String,
    },

    /// Core domain error
    #[error(transparent)]
    Core(#[from] CoreError),
}
