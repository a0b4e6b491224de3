//! Top-K ranking over listening counters
//!
//! Ordering contract: count descending, then key ascending. The same counter
//! always produces the same ranking.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Default number of entries per ranking in wrapped reports
pub const DEFAULT_TOP_K: usize = 5;

/// Play counts keyed by name
pub type Counter = HashMap<String, u64>;

/// Add one to `key`
pub fn increment(counter: &mut Counter, key: &str) {
    *counter.entry(key.to_string()).or_insert(0) += 1;
}

/// Ranked `(key, count)` pairs, highest count first
///
/// Serializes as a JSON object whose keys appear in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking(Vec<(String, u64)>);

impl Ranking {
    pub fn entries(&self) -> &[(String, u64)] {
        &self.0
    }

    /// Ranked keys without counts
    pub fn keys(&self) -> Vec<String> {
        self.0.iter().map(|(key, _)| key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<(String, u64)> {
        self.0
    }
}

impl Serialize for Ranking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// The `k` highest counts, ties broken alphabetically
pub fn top_k(counter: &Counter, k: usize) -> Ranking {
    let mut entries: Vec<(&String, &u64)> = counter.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    Ranking(
        entries
            .into_iter()
            .take(k)
            .map(|(key, &count)| (key.clone(), count))
            .collect(),
    )
}
