//! Core types for simulated playback

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of playable unit loaded into a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Song,
    Album,
    Playlist,
    Podcast,
}

impl SourceKind {
    /// Whether the kind is a multi-track collection that can be shuffled
    pub fn is_shufflable(self) -> bool {
        matches!(self, SourceKind::Album | SourceKind::Playlist)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Song => "song",
            SourceKind::Album => "album",
            SourceKind::Playlist => "playlist",
            SourceKind::Podcast => "podcast",
        };
        f.write_str(name)
    }
}

/// A song or podcast episode
///
/// Episodes have no artist, genre or album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Song or episode name
    pub name: String,

    #[serde(default)]
    pub artist: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    #[serde(default)]
    pub album: Option<String>,

    /// Track length in whole seconds
    pub duration_secs: u64,
}

impl Track {
    /// Create a music track
    pub fn song(
        name: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        album: impl Into<String>,
        duration_secs: u64,
    ) -> Self {
        Self {
            name: name.into(),
            artist: Some(artist.into()),
            genre: Some(genre.into()),
            album: Some(album.into()),
            duration_secs,
        }
    }

    /// Create a podcast episode
    pub fn episode(name: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            name: name.into(),
            artist: None,
            genre: None,
            album: None,
            duration_secs,
        }
    }
}

/// Read-only descriptor of a playable unit
///
/// Owned by the catalog and shared with playback through an `Arc`. Playback
/// only navigates it and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSourceView {
    /// Source name (song, album, playlist or podcast title)
    pub name: String,

    pub kind: SourceKind,

    /// Collection creator (artist for albums, host for podcasts)
    #[serde(default)]
    pub owner: Option<String>,

    /// Tracks in original order
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl AudioSourceView {
    /// Wrap a single song as a playable source
    pub fn song(track: Track) -> Self {
        Self {
            name: track.name.clone(),
            kind: SourceKind::Song,
            owner: track.artist.clone(),
            tracks: vec![track],
        }
    }

    /// Create an album owned by `artist`
    pub fn album(name: impl Into<String>, artist: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Album,
            owner: Some(artist.into()),
            tracks,
        }
    }

    /// Create a playlist owned by a listener
    pub fn playlist(name: impl Into<String>, owner: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Playlist,
            owner: Some(owner.into()),
            tracks,
        }
    }

    /// Create a podcast owned by a host
    pub fn podcast(name: impl Into<String>, host: impl Into<String>, episodes: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Podcast,
            owner: Some(host.into()),
            tracks: episodes,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Currently playing track, as seen from outside the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRef<'a> {
    /// Index in the source's original order
    pub index: usize,

    pub track: &'a Track,

    /// Seconds already played of this track
    pub elapsed_secs: u64,
}

impl TrackRef<'_> {
    /// Seconds left until the track is fully consumed
    pub fn remaining_secs(&self) -> u64 {
        self.track.duration_secs.saturating_sub(self.elapsed_secs)
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepeatMode {
    /// Stop when the last track ends
    #[default]
    Off,

    /// Replay the current track one more time, then turn repeat off
    Once,

    /// Loop the whole collection
    All,

    /// Loop the whole source (songs and podcasts)
    Infinite,

    /// Loop the current track
    RepeatCurrentSong,
}

impl RepeatMode {
    /// Next mode in the cycle for the given source kind
    ///
    /// Collections go through `All`, songs through `Infinite`, both then
    /// `RepeatCurrentSong`. Podcasts skip `RepeatCurrentSong`.
    pub fn cycle(self, kind: SourceKind) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Once,
            RepeatMode::Once if kind.is_shufflable() => RepeatMode::All,
            RepeatMode::Once => RepeatMode::Infinite,
            _ if kind == SourceKind::Podcast => RepeatMode::Off,
            RepeatMode::All | RepeatMode::Infinite => RepeatMode::RepeatCurrentSong,
            RepeatMode::RepeatCurrentSong => RepeatMode::Off,
        }
    }

    /// Whether running past the last track wraps to the first
    pub fn wraps(self) -> bool {
        matches!(self, RepeatMode::All | RepeatMode::Infinite)
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            RepeatMode::Off => "no repeat",
            RepeatMode::Once => "repeat once",
            RepeatMode::All => "repeat all",
            RepeatMode::Infinite => "repeat infinite",
            RepeatMode::RepeatCurrentSong => "repeat current song",
        };
        f.write_str(status)
    }
}

/// Listener identity used for per-artist attribution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Listener {
    pub username: String,
    pub city: String,
}

impl Listener {
    pub fn new(username: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            city: city.into(),
        }
    }
}

/// Outcome of a successful control operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Loaded,
    Paused,
    Resumed,
    RepeatChanged(RepeatMode),
    ShuffleActivated,
    ShuffleDeactivated,
    SkippedForward,
    Rewound,
    /// Moved to the named track
    SkippedToNext(String),
    ReturnedToPrevious(String),
    /// `next` ran past the last track with repeat off
    PlaybackEnded,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Loaded => f.write_str("Playback loaded successfully."),
            StatusMessage::Paused => f.write_str("Playback paused successfully."),
            StatusMessage::Resumed => f.write_str("Playback resumed successfully."),
            StatusMessage::RepeatChanged(mode) => write!(f, "Repeat mode changed to {mode}."),
            StatusMessage::ShuffleActivated => {
                f.write_str("Shuffle function activated successfully.")
            }
            StatusMessage::ShuffleDeactivated => {
                f.write_str("Shuffle function deactivated successfully.")
            }
            StatusMessage::SkippedForward => f.write_str("Skipped forward successfully."),
            StatusMessage::Rewound => f.write_str("Rewound successfully."),
            StatusMessage::SkippedToNext(name) => write!(
                f,
                "Skipped to next track successfully. The current track is {name}."
            ),
            StatusMessage::ReturnedToPrevious(name) => write!(
                f,
                "Returned to previous track successfully. The current track is {name}."
            ),
            StatusMessage::PlaybackEnded => {
                f.write_str("Please load a source before skipping to the next track.")
            }
        }
    }
}

/// Configuration for listener sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of entries per ranking in wrapped reports (default: 5)
    #[serde(default = "default_wrapped_limit")]
    pub wrapped_limit: usize,
}

fn default_wrapped_limit() -> usize {
    crate::ranking::DEFAULT_TOP_K
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            wrapped_limit: default_wrapped_limit(),
        }
    }
}
