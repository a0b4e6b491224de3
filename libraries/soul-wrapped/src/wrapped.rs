//! Wrapped reports
//!
//! Per-listener and per-artist "most played" digests built from the ranked
//! counters.

use crate::{
    ranking::{top_k, Ranking},
    registry::ArtistRegistry,
    stats::{ArtistStats, ListenerStats},
};
use serde::Serialize;

/// A listener's most played artists, genres, songs and albums
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerWrapped {
    pub top_artists: Ranking,
    pub top_genres: Ranking,
    pub top_songs: Ranking,
    pub top_albums: Ranking,
    /// Episodes are not ranked; kept so the report shape stays stable
    pub top_podcasts: Ranking,
}

impl ListenerWrapped {
    /// Build the report, or `None` if the listener has no complete music history
    pub fn from_stats(stats: &ListenerStats, limit: usize) -> Option<Self> {
        if !stats.has_music() {
            return None;
        }

        Some(Self {
            top_artists: top_k(&stats.artists, limit),
            top_genres: top_k(&stats.genres, limit),
            top_songs: top_k(&stats.songs, limit),
            top_albums: top_k(&stats.albums, limit),
            top_podcasts: Ranking::default(),
        })
    }
}

/// An artist's most played albums and songs, top fans, and reach
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistWrapped {
    pub top_albums: Ranking,
    pub top_songs: Ranking,
    pub top_fans: Vec<String>,
    /// Distinct listeners
    pub listeners: usize,
    /// Distinct listener cities
    pub cities: usize,
}

impl ArtistWrapped {
    /// Build the report, or `None` if the artist was never played
    pub fn from_stats(stats: &ArtistStats, limit: usize) -> Option<Self> {
        if stats.is_empty() {
            return None;
        }

        Some(Self {
            top_albums: top_k(&stats.best_albums, limit),
            top_songs: top_k(&stats.best_songs, limit),
            top_fans: top_k(&stats.best_fans, limit).keys(),
            listeners: stats.listeners.len(),
            cities: stats.cities.len(),
        })
    }
}

/// Wrapped report for the artist registered under `name`
pub fn artist_wrapped(
    registry: &dyn ArtistRegistry,
    name: &str,
    limit: usize,
) -> Option<ArtistWrapped> {
    registry
        .artist(name)
        .and_then(|stats| ArtistWrapped::from_stats(stats, limit))
}
