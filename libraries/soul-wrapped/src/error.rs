//! Error types for simulated playback

use crate::types::SourceKind;
use std::fmt;
use thiserror::Error;

/// Control operation a listener can attempt
///
/// Carried by errors so the user-facing message names what was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    PlayPause,
    Repeat,
    Shuffle,
    Forward,
    Backward,
    Next,
    Prev,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Operation::Load => "load",
            Operation::PlayPause => "play/pause",
            Operation::Repeat => "repeat",
            Operation::Shuffle => "shuffle",
            Operation::Forward => "forward",
            Operation::Backward => "backward",
            Operation::Next => "next",
            Operation::Prev => "prev",
        };
        f.write_str(action)
    }
}

/// Playback errors
///
/// All of these are caller-input errors. None of them leave the session in an
/// unusable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Operation requires a loaded source
    #[error("{}", no_source_message(.0))]
    NoSourceLoaded(Operation),

    /// Collection with zero tracks
    #[error("You can't load an empty audio collection!")]
    EmptySource,

    /// Operation is not defined for the loaded source kind
    #[error("{}", unsupported_message(.operation))]
    UnsupportedForKind {
        operation: Operation,
        kind: SourceKind,
    },

    /// Selection index beyond the last search result
    #[error("The selected ID is too high.")]
    SelectionOutOfRange(usize),

    /// Listener is offline
    #[error("{0} is offline.")]
    ListenerOffline(String),
}

fn no_source_message(operation: &Operation) -> &'static str {
    match operation {
        Operation::Load => "Please select a source before attempting to load.",
        Operation::PlayPause => {
            "Please load a source before attempting to pause or resume playback."
        }
        Operation::Repeat => "Please load a source before setting the repeat status.",
        Operation::Shuffle => "Please load a source before using the shuffle function.",
        Operation::Forward => "Please load a source before attempting to forward.",
        Operation::Backward => "Please select a source before rewinding.",
        Operation::Next => "Please load a source before skipping to the next track.",
        Operation::Prev => "Please load a source before returning to the previous track.",
    }
}

fn unsupported_message(operation: &Operation) -> &'static str {
    match operation {
        Operation::Shuffle => "The loaded source is not a playlist or an album.",
        Operation::Forward | Operation::Backward => "The loaded source is not a podcast.",
        _ => "The loaded source does not support this operation.",
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
