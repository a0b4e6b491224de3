//! Listener session
//!
//! Ties one listener's playback to their statistics. Every operation that can
//! move the playback position drains the playback events afterwards and
//! credits each consumed track, so statistics never lag behind playback.

use crate::{
    error::{PlaybackError, Result},
    playback::PlaybackState,
    registry::ArtistRegistry,
    stats::{record_consumption, ListenerStats},
    types::{AudioSourceView, Listener, SessionConfig, StatusMessage, TrackRef},
    wrapped::ListenerWrapped,
};
use std::sync::Arc;
use tracing::info;

/// One listener's playback session
#[derive(Debug, Clone)]
pub struct ListenerSession {
    listener: Listener,
    config: SessionConfig,
    online: bool,
    playback: PlaybackState,
    stats: ListenerStats,

    /// Last successfully loaded source
    ///
    /// Playback releases its source when it runs out; consumption events
    /// drained after that still need the track metadata.
    loaded: Option<Arc<AudioSourceView>>,
}

impl ListenerSession {
    pub fn new(listener: Listener, config: SessionConfig) -> Self {
        Self {
            listener,
            config,
            online: true,
            playback: PlaybackState::new(),
            stats: ListenerStats::new(),
            loaded: None,
        }
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Flip online/offline
    ///
    /// Offline listeners keep their position; time does not move for them.
    pub fn switch_status(&mut self) -> bool {
        self.online = !self.online;
        info!(
            "{} is now {}",
            self.listener.username,
            if self.online { "online" } else { "offline" }
        );
        self.online
    }

    // ===== Controls =====

    pub fn load(&mut self, source: Arc<AudioSourceView>) -> Result<StatusMessage> {
        self.require_online()?;
        let status = self.playback.load(Arc::clone(&source))?;
        self.loaded = Some(source);
        Ok(status)
    }

    pub fn toggle_pause(&mut self) -> Result<StatusMessage> {
        self.require_online()?;
        self.playback.toggle_pause()
    }

    pub fn cycle_repeat(&mut self) -> Result<StatusMessage> {
        self.require_online()?;
        self.playback.cycle_repeat()
    }

    pub fn toggle_shuffle(&mut self, seed: u64) -> Result<StatusMessage> {
        self.require_online()?;
        self.playback.toggle_shuffle(seed)
    }

    pub fn skip_next(&mut self) -> Result<StatusMessage> {
        self.require_online()?;
        self.playback.skip_next()
    }

    pub fn skip_prev(&mut self) -> Result<StatusMessage> {
        self.require_online()?;
        self.playback.skip_prev()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, registry: &mut dyn ArtistRegistry) -> Result<StatusMessage> {
        self.require_online()?;
        let status = self.playback.next();
        self.credit_pending(registry);
        status
    }

    pub fn prev(&mut self, registry: &mut dyn ArtistRegistry) -> Result<StatusMessage> {
        self.require_online()?;
        let status = self.playback.prev();
        self.credit_pending(registry);
        status
    }

    /// Simulate `seconds` of listening and credit every finished track
    ///
    /// Does nothing while offline or paused.
    pub fn advance(&mut self, seconds: u64, registry: &mut dyn ArtistRegistry) {
        if !self.online {
            return;
        }

        self.playback.advance(seconds);
        self.credit_pending(registry);
    }

    /// Drop the loaded source and all counters
    pub fn reset(&mut self) {
        self.playback.stop();
        self.loaded = None;
        self.stats.clear();
    }

    // ===== Queries =====

    pub fn current_track(&self) -> Option<TrackRef<'_>> {
        self.playback.current_track()
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn listener_stats(&self) -> &ListenerStats {
        &self.stats
    }

    /// Listener wrapped report, `None` when there is nothing to show
    pub fn wrapped(&self) -> Option<ListenerWrapped> {
        ListenerWrapped::from_stats(&self.stats, self.config.wrapped_limit)
    }

    // ===== Internal =====

    fn require_online(&self) -> Result<()> {
        if self.online {
            Ok(())
        } else {
            Err(PlaybackError::ListenerOffline(self.listener.username.clone()))
        }
    }

    /// Credit every consumption event since the last drain
    fn credit_pending(&mut self, registry: &mut dyn ArtistRegistry) {
        let events = self.playback.drain_events();
        let Some(source) = self.loaded.as_ref() else {
            return;
        };

        for index in events.iter().filter_map(|event| event.consumed_index()) {
            if let Some(track) = source.tracks.get(index) {
                record_consumption(track, source, &self.listener, &mut self.stats, registry);
            }
        }
    }
}
