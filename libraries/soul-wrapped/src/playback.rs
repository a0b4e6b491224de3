//! Playback state machine
//!
//! Tracks which source is loaded, where playback is inside it, and how time
//! moves it forward. Time only moves through [`PlaybackState::advance`]; there
//! is no clock.
//!
//! Every boundary crossing pushes a [`PlaybackEvent::TrackConsumed`] onto the
//! pending event list, exactly once per full play of a track. Callers drain
//! the list with [`PlaybackState::drain_events`] and credit statistics from it.

use crate::{
    error::{Operation, PlaybackError, Result},
    events::PlaybackEvent,
    shuffle::shuffle_order,
    types::{AudioSourceView, RepeatMode, SourceKind, StatusMessage, TrackRef},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of leaving the current track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// A track (possibly the same one) is current again
    Moved,
    /// Ran past the last track with no repeat; the source was released
    Ended,
}

/// Playback state for one listener
///
/// Positions are kept in two coordinates: `order` maps navigation positions
/// to original track indices, and `position` indexes into `order`. Without
/// shuffle, `order` is the identity.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    source: Option<Arc<AudioSourceView>>,

    /// Navigation order as original track indices
    order: Vec<usize>,

    /// Current position in `order`
    position: usize,

    /// Seconds played of the current track
    elapsed: u64,

    paused: bool,
    repeat: RepeatMode,
    shuffled: bool,

    /// Highest original index credited since the last load
    last_fully_played: Option<usize>,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Loading =====

    /// Load a source, replacing whatever was loaded before
    ///
    /// Position, pause, repeat and shuffle all reset. A failed load leaves the
    /// previous source untouched.
    pub fn load(&mut self, source: Arc<AudioSourceView>) -> Result<StatusMessage> {
        if source.is_empty() && source.kind != SourceKind::Song {
            return Err(PlaybackError::EmptySource);
        }

        debug!(
            "Loading {} '{}' ({} tracks)",
            source.kind,
            source.name,
            source.len()
        );

        self.reset();
        self.order = (0..source.len()).collect();
        if !source.is_empty() {
            self.source = Some(source);
        }

        Ok(StatusMessage::Loaded)
    }

    /// Release the loaded source
    pub fn stop(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.source = None;
        self.order.clear();
        self.position = 0;
        self.elapsed = 0;
        self.paused = false;
        self.repeat = RepeatMode::Off;
        self.shuffled = false;
        self.last_fully_played = None;
        self.pending_events.clear();
    }

    // ===== Controls =====

    /// Flip between paused and playing
    pub fn toggle_pause(&mut self) -> Result<StatusMessage> {
        self.require_source(Operation::PlayPause)?;
        self.paused = !self.paused;

        Ok(if self.paused {
            StatusMessage::Paused
        } else {
            StatusMessage::Resumed
        })
    }

    /// Move to the next repeat mode for the loaded kind
    pub fn cycle_repeat(&mut self) -> Result<StatusMessage> {
        let kind = self.require_source(Operation::Repeat)?;
        self.repeat = self.repeat.cycle(kind);
        debug!("Repeat mode is now {}", self.repeat);

        Ok(StatusMessage::RepeatChanged(self.repeat))
    }

    /// Turn shuffle on with `seed`, or turn it off
    ///
    /// The current track stays current either way; only the order of the
    /// tracks around it changes.
    pub fn toggle_shuffle(&mut self, seed: u64) -> Result<StatusMessage> {
        let kind = self.require_source(Operation::Shuffle)?;
        if !kind.is_shufflable() {
            return Err(PlaybackError::UnsupportedForKind {
                operation: Operation::Shuffle,
                kind,
            });
        }

        let current = self.order[self.position];
        let len = self.order.len();

        if self.shuffled {
            self.order = (0..len).collect();
            self.position = current;
            self.shuffled = false;
            debug!("Shuffle off, back at track {}", current);
            Ok(StatusMessage::ShuffleDeactivated)
        } else {
            self.order = shuffle_order(seed, len);
            self.position = self
                .order
                .iter()
                .position(|&index| index == current)
                .unwrap_or(0);
            self.shuffled = true;
            debug!("Shuffle on (seed {}), order {:?}", seed, self.order);
            Ok(StatusMessage::ShuffleActivated)
        }
    }

    /// Podcast-only: jump to the next episode, stopping at the last one
    pub fn skip_next(&mut self) -> Result<StatusMessage> {
        self.require_podcast(Operation::Forward)?;
        let target = (self.position + 1).min(self.order.len() - 1);
        self.jump_to_position(target);
        Ok(StatusMessage::SkippedForward)
    }

    /// Podcast-only: jump to the previous episode, stopping at the first one
    pub fn skip_prev(&mut self) -> Result<StatusMessage> {
        self.require_podcast(Operation::Backward)?;
        let target = self.position.saturating_sub(1);
        self.jump_to_position(target);
        Ok(StatusMessage::Rewound)
    }

    /// Leave the current track without crediting it
    ///
    /// Follows the same repeat and shuffle rules as a boundary crossing during
    /// [`advance`](Self::advance).
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<StatusMessage> {
        self.require_source(Operation::Next)?;

        match self.step_forward() {
            Step::Moved => Ok(StatusMessage::SkippedToNext(self.current_name())),
            Step::Ended => Ok(StatusMessage::PlaybackEnded),
        }
    }

    /// Restart the current track, or go back one if it has not started
    pub fn prev(&mut self) -> Result<StatusMessage> {
        self.require_source(Operation::Prev)?;

        if self.elapsed > 0 || self.position == 0 {
            self.elapsed = 0;
        } else {
            self.jump_to_position(self.position - 1);
        }

        Ok(StatusMessage::ReturnedToPrevious(self.current_name()))
    }

    // ===== Time =====

    /// Simulate `seconds` of listening
    ///
    /// Each crossed track end credits that track once, then moves on per the
    /// repeat mode. Time left over after the source is exhausted is dropped.
    /// Does nothing while paused.
    pub fn advance(&mut self, seconds: u64) {
        if self.paused {
            return;
        }

        let mut seconds = seconds;
        let mut idle_crossings = 0usize;

        while seconds > 0 {
            let Some(duration) = self.current_duration() else {
                break;
            };

            let remaining = duration.saturating_sub(self.elapsed);
            if seconds < remaining {
                self.elapsed += seconds;
                break;
            }

            seconds -= remaining;

            if remaining == 0 {
                idle_crossings += 1;
                if idle_crossings > self.order.len() {
                    warn!("Zero-length tracks consumed a full cycle, dropping {seconds}s");
                    break;
                }
            } else {
                idle_crossings = 0;
            }

            self.consume_current();
            if self.step_forward() == Step::Ended {
                break;
            }
        }
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Queries =====

    /// Currently playing track, or `None` when nothing is loaded or playback ended
    pub fn current_track(&self) -> Option<TrackRef<'_>> {
        let source = self.source.as_ref()?;
        let index = *self.order.get(self.position)?;

        Some(TrackRef {
            index,
            track: &source.tracks[index],
            elapsed_secs: self.elapsed,
        })
    }

    pub fn source(&self) -> Option<&Arc<AudioSourceView>> {
        self.source.as_ref()
    }

    pub fn kind(&self) -> Option<SourceKind> {
        self.source.as_ref().map(|source| source.kind)
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Original-order index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.source.as_ref()?;
        self.order.get(self.position).copied()
    }

    pub fn elapsed_in_track(&self) -> u64 {
        self.elapsed
    }

    /// Seconds left in the current track (0 when nothing is loaded)
    pub fn remaining_in_track(&self) -> u64 {
        self.current_track()
            .map(|track| track.remaining_secs())
            .unwrap_or(0)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Shuffle permutation, empty when not shuffled
    pub fn shuffle_order(&self) -> &[usize] {
        if self.shuffled {
            &self.order
        } else {
            &[]
        }
    }

    /// Tracks in the order they will be visited
    pub fn navigation_order(&self) -> &[usize] {
        &self.order
    }

    /// Highest original-order index credited since the last load
    pub fn last_fully_played_index(&self) -> Option<usize> {
        self.last_fully_played
    }

    // ===== Internal =====

    fn require_source(&self, operation: Operation) -> Result<SourceKind> {
        self.kind()
            .ok_or(PlaybackError::NoSourceLoaded(operation))
    }

    fn require_podcast(&self, operation: Operation) -> Result<()> {
        let kind = self.require_source(operation)?;
        if kind == SourceKind::Podcast {
            Ok(())
        } else {
            Err(PlaybackError::UnsupportedForKind { operation, kind })
        }
    }

    fn current_duration(&self) -> Option<u64> {
        self.current_track().map(|current| current.track.duration_secs)
    }

    fn current_name(&self) -> String {
        self.current_track()
            .map(|current| current.track.name.clone())
            .unwrap_or_default()
    }

    fn consume_current(&mut self) {
        let Some(index) = self.current_index() else {
            return;
        };

        debug!("Track {} fully played", index);
        self.last_fully_played =
            Some(self.last_fully_played.map_or(index, |last| last.max(index)));
        self.pending_events
            .push(PlaybackEvent::TrackConsumed { index });
    }

    fn jump_to_position(&mut self, target: usize) {
        let previous_index = self.order[self.position];
        self.position = target;
        self.elapsed = 0;

        let index = self.order[self.position];
        if index != previous_index {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                index,
                previous_index,
            });
        }
    }

    /// Leave the current track per the repeat mode
    fn step_forward(&mut self) -> Step {
        let previous_index = self.order[self.position];

        match self.repeat {
            RepeatMode::RepeatCurrentSong => {}
            RepeatMode::Once => {
                // The replay itself runs with repeat off
                self.repeat = RepeatMode::Off;
            }
            RepeatMode::Off | RepeatMode::All | RepeatMode::Infinite => {
                if self.position + 1 < self.order.len() {
                    self.position += 1;
                } else if self.repeat.wraps() {
                    self.position = 0;
                } else {
                    self.finish();
                    return Step::Ended;
                }
            }
        }

        self.elapsed = 0;
        let index = self.order[self.position];
        debug!("Track {} -> {}", previous_index, index);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            index,
            previous_index,
        });

        Step::Moved
    }

    /// Release the source after the last track, keeping undrained events
    fn finish(&mut self) {
        if let Some(source) = self.source.take() {
            info!("Finished {} '{}'", source.kind, source.name);
        }

        self.order.clear();
        self.position = 0;
        self.elapsed = 0;
        self.paused = false;
        self.repeat = RepeatMode::Off;
        self.shuffled = false;
        self.pending_events.push(PlaybackEvent::SourceExhausted);
    }
}
