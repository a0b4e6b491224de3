//! Playback Events
//!
//! Emitted by [`PlaybackState`](crate::PlaybackState) and drained by the
//! session after every operation that can move the playback position:
//! - Track changes (navigation or boundary crossing)
//! - Track consumption (full duration traversed, credited exactly once)
//! - Source exhaustion (ran past the last track with repeat off)

use serde::{Deserialize, Serialize};

/// Events emitted by the playback state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Current track changed
    ///
    /// Also emitted when a repeat restarts the same track.
    TrackChanged {
        /// Original-order index of the new current track
        index: usize,
        /// Original-order index of the track that was left
        previous_index: usize,
    },

    /// A track's full duration was traversed
    TrackConsumed {
        /// Original-order index of the consumed track
        index: usize,
    },

    /// Playback ran past the last track with repeat off
    SourceExhausted,
}

impl PlaybackEvent {
    /// Index of the consumed track, if this is a consumption event
    pub fn consumed_index(&self) -> Option<usize> {
        match self {
            PlaybackEvent::TrackConsumed { index } => Some(*index),
            _ => None,
        }
    }
}
