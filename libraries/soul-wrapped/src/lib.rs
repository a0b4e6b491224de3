//! Soul Player - Wrapped
//!
//! Simulated playback sessions and the listening statistics they produce.
//!
//! This crate provides:
//! - A playback state machine (load, pause, repeat, seeded shuffle, skips)
//! - Discrete time simulation: position moves only through `advance`
//! - Exactly-once crediting of every fully played track
//! - Per-listener and per-artist counters
//! - Top-K rankings and "wrapped" reports
//!
//! # Architecture
//!
//! `soul-wrapped` never decodes audio and never reads a clock:
//! - Sources come from the catalog as immutable [`AudioSourceView`]s
//! - Artist records live in an [`ArtistRegistry`] passed in by the caller
//! - [`PlaybackState`] emits [`PlaybackEvent`]s; [`ListenerSession`] turns
//!   consumption events into statistics
//!
//! # Example
//!
//! ```rust
//! use soul_wrapped::{
//!     AudioSourceView, InMemoryArtistRegistry, Listener, ListenerSession, SessionConfig, Track,
//! };
//! use std::sync::Arc;
//!
//! let album = Arc::new(AudioSourceView::album(
//!     "Parachutes",
//!     "Coldplay",
//!     vec![
//!         Track::song("Don't Panic", "Coldplay", "rock", "Parachutes", 137),
//!         Track::song("Shiver", "Coldplay", "rock", "Parachutes", 304),
//!     ],
//! ));
//!
//! let mut registry = InMemoryArtistRegistry::new();
//! let mut session = ListenerSession::new(Listener::new("alice", "Paris"), SessionConfig::default());
//!
//! session.load(album).unwrap();
//! session.advance(200, &mut registry);
//!
//! assert_eq!(session.current_track().unwrap().track.name, "Shiver");
//! assert_eq!(session.listener_stats().songs["Don't Panic"], 1);
//! ```

mod error;
mod events;
mod playback;
pub mod ranking;
mod registry;
mod session;
pub mod shuffle;
mod stats;
pub mod types;
mod wrapped;

// Public exports
pub use error::{Operation, PlaybackError, Result};
pub use events::PlaybackEvent;
pub use playback::PlaybackState;
pub use ranking::{top_k, Counter, Ranking, DEFAULT_TOP_K};
pub use registry::{ArtistRegistry, InMemoryArtistRegistry};
pub use session::ListenerSession;
pub use shuffle::shuffle_order;
pub use stats::{record_consumption, ArtistStats, ListenerStats};
pub use types::{
    AudioSourceView, Listener, RepeatMode, SessionConfig, SourceKind, StatusMessage, Track,
    TrackRef,
};
pub use wrapped::{artist_wrapped, ArtistWrapped, ListenerWrapped};
