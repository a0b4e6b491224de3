/// Replay error types
use soul_wrapped::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    /// Command addressed to someone who is neither a listener nor an artist
    #[error("The username {0} doesn't exist.")]
    UnknownUser(String),

    /// Rejected by the playback core; the message goes to the command output
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid scenario: {0}")]
    Scenario(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReplayError {
    /// Whether the error only affects one command rather than the whole replay
    pub fn is_command_error(&self) -> bool {
        matches!(self, ReplayError::UnknownUser(_) | ReplayError::Playback(_))
    }
}
