//! Artist statistics registry
//!
//! The catalog owns artist records. Playback only needs to find one by name,
//! creating it on first play, so that is all the trait asks for.

use crate::stats::ArtistStats;
use std::collections::HashMap;
use tracing::debug;

/// Resolves artist names to their statistics record
///
/// Passed explicitly to everything that credits plays; sessions never reach
/// for a global registry.
pub trait ArtistRegistry {
    /// Record for `name`, created empty if absent
    fn resolve_artist(&mut self, name: &str) -> &mut ArtistStats;

    /// Record for `name`, if the artist has ever been resolved
    fn artist(&self, name: &str) -> Option<&ArtistStats>;
}

/// In-memory registry keyed by artist name
#[derive(Debug, Clone, Default)]
pub struct InMemoryArtistRegistry {
    artists: HashMap<String, ArtistStats>,
}

impl InMemoryArtistRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artist ahead of any plays
    pub fn add_artist(&mut self, name: impl Into<String>) {
        self.artists.entry(name.into()).or_default();
    }

    /// Names of all known artists, sorted
    pub fn artist_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.artists.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

impl ArtistRegistry for InMemoryArtistRegistry {
    fn resolve_artist(&mut self, name: &str) -> &mut ArtistStats {
        if !self.artists.contains_key(name) {
            debug!("Registering artist '{}' on first play", name);
        }
        self.artists.entry(name.to_string()).or_default()
    }

    fn artist(&self, name: &str) -> Option<&ArtistStats> {
        self.artists.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_creates_once() {
        let mut registry = InMemoryArtistRegistry::new();
        assert!(registry.artist("Muse").is_none());

        registry.resolve_artist("Muse");
        registry.resolve_artist("Muse");

        assert_eq!(registry.len(), 1);
        assert!(registry.artist("Muse").unwrap().is_empty());
    }

    #[test]
    fn resolve_returns_existing_record() {
        let mut registry = InMemoryArtistRegistry::new();
        registry
            .resolve_artist("Muse")
            .best_songs
            .insert("Uprising".to_string(), 4);

        assert_eq!(registry.resolve_artist("Muse").best_songs["Uprising"], 4);
    }

    #[test]
    fn artist_names_sorted() {
        let mut registry = InMemoryArtistRegistry::new();
        registry.add_artist("Muse");
        registry.add_artist("Adele");
        registry.add_artist("Muse");
        assert_eq!(registry.artist_names(), vec!["Adele", "Muse"]);
    }
}
