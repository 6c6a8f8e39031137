//! Shuffle algorithm for queue randomization

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tempo_core::MediaItem;

/// Create the engine's shuffle RNG
///
/// A fixed seed gives a reproducible shuffle order (tests, demos).
pub(crate) fn shuffle_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Return a uniformly shuffled copy of `items`
///
/// Fisher-Yates: every permutation is equally likely, including the
/// original order.
pub(crate) fn shuffled(items: &[MediaItem], rng: &mut StdRng) -> Vec<MediaItem> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempo_core::MediaId;

    fn create_test_items(count: u64) -> Vec<MediaItem> {
        (1..=count)
            .map(|i| {
                MediaItem::new(
                    MediaId::new(i),
                    format!("Track {}", i),
                    "Artist",
                    format!("{}.mp3", i),
                )
            })
            .collect()
    }

    #[test]
    fn shuffle_preserves_all_items() {
        let items = create_test_items(10);
        let mut rng = shuffle_rng(Some(1));

        let result = shuffled(&items, &mut rng);

        let ids: HashSet<MediaId> = result.iter().map(|m| m.id).collect();
        assert_eq!(result.len(), 10);
        assert_eq!(ids.len(), 10);
        assert!(items.iter().all(|m| ids.contains(&m.id)));
    }

    #[test]
    fn shuffle_leaves_input_untouched() {
        let items = create_test_items(5);
        let mut rng = shuffle_rng(Some(1));

        let _ = shuffled(&items, &mut rng);

        let order: Vec<u64> = items.iter().map(|m| m.id.get()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn same_seed_same_order() {
        let items = create_test_items(20);

        let first = shuffled(&items, &mut shuffle_rng(Some(99)));
        let second = shuffled(&items, &mut shuffle_rng(Some(99)));

        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_changes_order_eventually() {
        let items = create_test_items(8);
        let mut rng = shuffle_rng(Some(3));

        // 1/40320 chance per draw of the identity permutation
        let changed = (0..10).any(|_| shuffled(&items, &mut rng) != items);
        assert!(changed);
    }

    #[test]
    fn shuffle_empty_and_single() {
        let mut rng = shuffle_rng(None);
        assert!(shuffled(&[], &mut rng).is_empty());

        let single = create_test_items(1);
        assert_eq!(shuffled(&single, &mut rng), single);
    }
}
