//! Property-based tests for the playback state machine
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use soul_wrapped::{
    shuffle_order, top_k, AudioSourceView, Counter, PlaybackEvent, PlaybackState, Track,
};
use std::collections::HashSet;
use std::sync::Arc;

// ===== Helpers =====

fn arbitrary_album() -> impl Strategy<Value = Arc<AudioSourceView>> {
    prop::collection::vec(1u64..300, 1..12).prop_map(|durations| {
        let tracks = durations
            .into_iter()
            .enumerate()
            .map(|(i, d)| Track::song(format!("Song {i}"), "Artist", "pop", "Album", d))
            .collect();
        Arc::new(AudioSourceView::album("Album", "Artist", tracks))
    })
}

/// Loaded state with `repeat_steps` presses of the repeat button and optional shuffle
fn prepared(source: &Arc<AudioSourceView>, repeat_steps: usize, shuffle: Option<u64>) -> PlaybackState {
    let mut state = PlaybackState::new();
    state.load(Arc::clone(source)).unwrap();
    for _ in 0..repeat_steps {
        state.cycle_repeat().unwrap();
    }
    if let Some(seed) = shuffle {
        state.toggle_shuffle(seed).unwrap();
    }
    state
}

fn snapshot(state: &PlaybackState) -> (Option<usize>, u64, bool) {
    (
        state.current_index(),
        state.elapsed_in_track(),
        state.is_loaded(),
    )
}

// ===== Property Tests =====

proptest! {
    /// Property: splitting an advance never changes the outcome
    #[test]
    fn advance_is_associative(
        source in arbitrary_album(),
        repeat_steps in 0usize..4,
        shuffle in proptest::option::of(any::<u64>()),
        chunks in prop::collection::vec(0u64..400, 1..10)
    ) {
        let mut split = prepared(&source, repeat_steps, shuffle);
        let mut whole = split.clone();

        let mut split_events = Vec::new();
        for chunk in &chunks {
            split.advance(*chunk);
            split_events.extend(split.drain_events());
        }
        whole.advance(chunks.iter().sum());
        let whole_events = whole.drain_events();

        prop_assert_eq!(snapshot(&split), snapshot(&whole));
        prop_assert_eq!(split_events, whole_events);
    }

    /// Property: consumed time matches credited durations
    ///
    /// Without repeat, every second is either inside a credited track, in the
    /// current track's elapsed offset, or dropped after the last track.
    #[test]
    fn credits_account_for_time(
        source in arbitrary_album(),
        seconds in 0u64..5_000
    ) {
        let mut state = prepared(&source, 0, None);
        state.advance(seconds);

        let credited: Vec<usize> = state
            .drain_events()
            .iter()
            .filter_map(PlaybackEvent::consumed_index)
            .collect();
        let credited_time: u64 = credited.iter().map(|&i| source.tracks[i].duration_secs).sum();

        let unique: HashSet<usize> = credited.iter().copied().collect();
        prop_assert_eq!(unique.len(), credited.len(), "track credited twice without repeat");

        if state.is_loaded() {
            prop_assert_eq!(credited_time + state.elapsed_in_track(), seconds);
        } else {
            prop_assert!(credited_time <= seconds);
            prop_assert_eq!(credited.len(), source.len());
        }
    }

    /// Property: position invariants hold after any advance
    #[test]
    fn elapsed_stays_inside_track(
        source in arbitrary_album(),
        repeat_steps in 0usize..4,
        seconds in 0u64..10_000
    ) {
        let mut state = prepared(&source, repeat_steps, None);
        state.advance(seconds);

        if let Some(current) = state.current_track() {
            prop_assert!(current.index < source.len());
            prop_assert!(current.elapsed_secs < current.track.duration_secs);
        }
    }

    /// Property: shuffling twice with the same seed restores the original order
    #[test]
    fn shuffle_toggle_round_trips(
        source in arbitrary_album(),
        seed in any::<u64>(),
        seconds in 0u64..2_000
    ) {
        let mut state = prepared(&source, 2, None);
        state.advance(seconds);
        let before = (state.navigation_order().to_vec(), state.current_index());

        state.toggle_shuffle(seed).unwrap();
        let expected = shuffle_order(seed, source.len());
        prop_assert_eq!(state.shuffle_order(), expected.as_slice());
        prop_assert_eq!(state.current_index(), before.1);

        state.toggle_shuffle(seed).unwrap();
        prop_assert_eq!((state.navigation_order().to_vec(), state.current_index()), before);
    }

    /// Property: shuffle orders are deterministic permutations
    #[test]
    fn shuffle_order_is_deterministic_permutation(seed in any::<u64>(), len in 0usize..200) {
        let order = shuffle_order(seed, len);
        let again = shuffle_order(seed, len);
        prop_assert_eq!(&order, &again);

        let unique: HashSet<usize> = order.iter().copied().collect();
        prop_assert_eq!(unique.len(), len);
        prop_assert!(order.iter().all(|&i| i < len));
    }

    /// Property: rankings are sorted, truncated and drawn from the counter
    #[test]
    fn top_k_is_ordered(
        entries in prop::collection::hash_map("[a-z]{1,6}", 1u64..20, 0..30),
        k in 0usize..10
    ) {
        let counter: Counter = entries;
        let ranking = top_k(&counter, k);

        prop_assert_eq!(ranking.len(), k.min(counter.len()));
        for pair in ranking.entries().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.1 > b.1 || (a.1 == b.1 && a.0 < b.0));
        }
        for (key, count) in ranking.entries() {
            prop_assert_eq!(counter.get(key), Some(count));
        }
    }
}
