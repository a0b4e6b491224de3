//! Listening statistics
//!
//! Counters only grow. A listener's counters are owned by its session; an
//! artist's counters are owned by the [`ArtistRegistry`] shared between
//! sessions.

use crate::{
    ranking::{increment, Counter},
    registry::ArtistRegistry,
    types::{AudioSourceView, Listener, SourceKind, Track},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What one listener has played
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerStats {
    pub artists: Counter,
    pub genres: Counter,
    pub songs: Counter,
    pub albums: Counter,
}

impl ListenerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every music counter has at least one entry
    pub fn has_music(&self) -> bool {
        !(self.artists.is_empty()
            || self.genres.is_empty()
            || self.songs.is_empty()
            || self.albums.is_empty())
    }

    pub fn clear(&mut self) {
        self.artists.clear();
        self.genres.clear();
        self.songs.clear();
        self.albums.clear();
    }
}

/// Who has played one artist, and what
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistStats {
    pub best_albums: Counter,
    pub best_songs: Counter,
    /// Plays per listener name
    pub best_fans: Counter,
    /// Plays per listener name, reported as a distinct count
    pub listeners: Counter,
    /// Plays per listener city, reported as a distinct count
    pub cities: Counter,
}

impl ArtistStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.best_songs.is_empty()
    }

    fn credit(&mut self, track: &Track, listener: &Listener) {
        if let Some(album) = &track.album {
            increment(&mut self.best_albums, album);
        }
        increment(&mut self.best_songs, &track.name);
        increment(&mut self.best_fans, &listener.username);
        increment(&mut self.listeners, &listener.username);
        increment(&mut self.cities, &listener.city);
    }
}

/// Credit one full play of `track` from `source`
///
/// Podcast episodes only count towards the listener's song counter. Music
/// tracks count for the listener and for the attributed artist: the owner of
/// an album, otherwise the track's own artist.
pub fn record_consumption(
    track: &Track,
    source: &AudioSourceView,
    listener: &Listener,
    listener_stats: &mut ListenerStats,
    registry: &mut dyn ArtistRegistry,
) {
    increment(&mut listener_stats.songs, &track.name);
    if source.kind == SourceKind::Podcast {
        return;
    }

    if let Some(album) = &track.album {
        increment(&mut listener_stats.albums, album);
    }
    if let Some(genre) = &track.genre {
        increment(&mut listener_stats.genres, genre);
    }
    if let Some(artist) = &track.artist {
        increment(&mut listener_stats.artists, artist);
    }

    let attributed = match source.kind {
        SourceKind::Album => source.owner.as_ref().or(track.artist.as_ref()),
        _ => track.artist.as_ref(),
    };

    let Some(artist) = attributed else {
        return;
    };

    debug!(
        "Crediting '{}' by {} to {}",
        track.name, artist, listener.username
    );
    registry.resolve_artist(artist).credit(track, listener);
}
