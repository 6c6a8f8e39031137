//! Dual-order play queue
//!
//! Keeps the user's canonical order and a shuffled order side by side:
//! - Canonical: the order the user assembled (album order, manual queue)
//! - Shuffled: the same items, permuted once when the queue is created
//!
//! Both orders always hold the same set of items. Every mutation is applied
//! to both, with insertion points computed per order.

use rand::rngs::StdRng;
use tempo_core::{MediaId, MediaItem};

use crate::shuffle::shuffled;

/// Which of the two orderings to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrder {
    /// Order the user assembled
    Canonical,
    /// Randomized order
    Shuffled,
}

impl QueueOrder {
    /// Active ordering for a shuffle flag
    pub fn active(is_shuffling: bool) -> Self {
        if is_shuffling {
            Self::Shuffled
        } else {
            Self::Canonical
        }
    }
}

/// Two parallel orderings of the same items
///
/// ```text
/// canonical: [A, B, C, D]     add X after current (B)
/// shuffled:  [C, A, D, B]  ─▶ canonical: [A, B, X, C, D]
///                             shuffled:  [C, A, D, B, X]
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    canonical: Vec<MediaItem>,
    shuffled: Vec<MediaItem>,
}

impl PlayQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both orders with `items` and a fresh permutation of them
    pub(crate) fn replace(&mut self, items: Vec<MediaItem>, rng: &mut StdRng) {
        self.shuffled = shuffled(&items, rng);
        self.canonical = items;
    }

    /// Start a one-item queue (a single item needs no shuffling)
    pub(crate) fn start_single(&mut self, item: MediaItem) {
        self.shuffled = vec![item.clone()];
        self.canonical = vec![item];
    }

    /// Items in the given order
    pub fn items(&self, order: QueueOrder) -> &[MediaItem] {
        match order {
            QueueOrder::Canonical => &self.canonical,
            QueueOrder::Shuffled => &self.shuffled,
        }
    }

    /// Items in canonical order
    pub fn canonical(&self) -> &[MediaItem] {
        &self.canonical
    }

    /// Items in shuffled order
    pub fn shuffled(&self) -> &[MediaItem] {
        &self.shuffled
    }

    /// Item at `index` in the given order
    pub fn get(&self, order: QueueOrder, index: usize) -> Option<&MediaItem> {
        self.items(order).get(index)
    }

    /// Position of `id` in the given order
    pub fn position(&self, order: QueueOrder, id: MediaId) -> Option<usize> {
        self.items(order).iter().position(|item| item.id == id)
    }

    /// Check membership (canonical order is authoritative)
    pub fn contains(&self, id: MediaId) -> bool {
        self.canonical.iter().any(|item| item.id == id)
    }

    /// Number of items (canonical order is authoritative)
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    /// Check if queue is empty (canonical order is authoritative)
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Insert `item` to play next
    ///
    /// Goes right after `canonical_index` in canonical order, and right after
    /// `current`'s own position in shuffled order. If `current` is missing
    /// from the shuffled order the item is appended there instead.
    pub(crate) fn insert_after(
        &mut self,
        item: MediaItem,
        canonical_index: usize,
        current: MediaId,
    ) {
        let canonical_at = (canonical_index + 1).min(self.canonical.len());
        self.canonical.insert(canonical_at, item.clone());

        match self.position(QueueOrder::Shuffled, current) {
            Some(pos) => self.shuffled.insert(pos + 1, item),
            None => self.shuffled.push(item),
        }
    }

    /// Remove `id` from both orders, keeping each order's relative ordering
    ///
    /// Returns false if it was not in the canonical order.
    pub(crate) fn remove(&mut self, id: MediaId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.canonical.retain(|item| item.id != id);
        self.shuffled.retain(|item| item.id != id);
        true
    }

    /// Move the item at `from` to `to` within one order only
    ///
    /// Returns false (and changes nothing) if the indices are equal or out
    /// of bounds.
    pub(crate) fn move_item(&mut self, order: QueueOrder, from: usize, to: usize) -> bool {
        let items = match order {
            QueueOrder::Canonical => &mut self.canonical,
            QueueOrder::Shuffled => &mut self.shuffled,
        };

        if from == to || from >= items.len() || to >= items.len() {
            return false;
        }

        let item = items.remove(from);
        items.insert(to, item);
        true
    }

    /// Clear both orders
    pub(crate) fn clear(&mut self) {
        self.canonical.clear();
        self.shuffled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::shuffle_rng;
    use std::collections::HashSet;

    fn create_test_item(id: u64) -> MediaItem {
        MediaItem::new(
            MediaId::new(id),
            format!("Track {}", id),
            "Test Artist",
            format!("/media/{}.mp3", id),
        )
    }

    fn ids(items: &[MediaItem]) -> Vec<u64> {
        items.iter().map(|item| item.id.get()).collect()
    }

    fn same_members(queue: &PlayQueue) -> bool {
        let canonical: HashSet<MediaId> = queue.canonical().iter().map(|m| m.id).collect();
        let shuffled: HashSet<MediaId> = queue.shuffled().iter().map(|m| m.id).collect();
        canonical == shuffled && queue.canonical().len() == queue.shuffled().len()
    }

    /// Queue with a hand-picked shuffled order
    fn queue_with_orders(canonical: &[u64], shuffled: &[u64]) -> PlayQueue {
        PlayQueue {
            canonical: canonical.iter().copied().map(create_test_item).collect(),
            shuffled: shuffled.iter().copied().map(create_test_item).collect(),
        }
    }

    #[test]
    fn create_empty_queue() {
        let queue = PlayQueue::new();
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(queue.shuffled().is_empty());
    }

    #[test]
    fn replace_keeps_canonical_order_and_shuffles_copy() {
        let mut queue = PlayQueue::new();
        let mut rng = shuffle_rng(Some(5));

        queue.replace((1..=6).map(create_test_item).collect(), &mut rng);

        assert_eq!(ids(queue.canonical()), vec![1, 2, 3, 4, 5, 6]);
        assert!(same_members(&queue));
    }

    #[test]
    fn start_single_fills_both_orders() {
        let mut queue = PlayQueue::new();
        queue.start_single(create_test_item(9));

        assert_eq!(ids(queue.canonical()), vec![9]);
        assert_eq!(ids(queue.shuffled()), vec![9]);
    }

    #[test]
    fn insert_after_uses_independent_positions() {
        let mut queue = queue_with_orders(&[1, 2, 3, 4], &[3, 1, 4, 2]);

        // Current track is 2: canonical index 1, shuffled index 3
        queue.insert_after(create_test_item(5), 1, MediaId::new(2));

        assert_eq!(ids(queue.canonical()), vec![1, 2, 5, 3, 4]);
        assert_eq!(ids(queue.shuffled()), vec![3, 1, 4, 2, 5]);
        assert!(same_members(&queue));
    }

    #[test]
    fn insert_after_appends_when_current_missing_from_shuffled() {
        let mut queue = queue_with_orders(&[1, 2], &[2, 1]);

        queue.insert_after(create_test_item(3), 0, MediaId::new(42));

        assert_eq!(ids(queue.canonical()), vec![1, 3, 2]);
        assert_eq!(ids(queue.shuffled()), vec![2, 1, 3]);
    }

    #[test]
    fn remove_filters_both_orders() {
        let mut queue = queue_with_orders(&[1, 2, 3, 4], &[4, 2, 1, 3]);

        assert!(queue.remove(MediaId::new(2)));

        assert_eq!(ids(queue.canonical()), vec![1, 3, 4]);
        assert_eq!(ids(queue.shuffled()), vec![4, 1, 3]);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut queue = queue_with_orders(&[1, 2], &[2, 1]);

        assert!(!queue.remove(MediaId::new(7)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn move_item_touches_one_order_only() {
        let mut queue = queue_with_orders(&[1, 2, 3, 4], &[4, 3, 2, 1]);

        assert!(queue.move_item(QueueOrder::Canonical, 3, 0));

        assert_eq!(ids(queue.canonical()), vec![4, 1, 2, 3]);
        assert_eq!(ids(queue.shuffled()), vec![4, 3, 2, 1]);
    }

    #[test]
    fn move_item_forward() {
        let mut queue = queue_with_orders(&[1, 2, 3, 4], &[1, 2, 3, 4]);

        assert!(queue.move_item(QueueOrder::Shuffled, 0, 2));
        assert_eq!(ids(queue.shuffled()), vec![2, 3, 1, 4]);
    }

    #[test]
    fn move_item_rejects_bad_indices() {
        let mut queue = queue_with_orders(&[1, 2, 3], &[1, 2, 3]);

        assert!(!queue.move_item(QueueOrder::Canonical, 1, 1));
        assert!(!queue.move_item(QueueOrder::Canonical, 3, 0));
        assert!(!queue.move_item(QueueOrder::Canonical, 0, 3));
        assert_eq!(ids(queue.canonical()), vec![1, 2, 3]);
    }

    #[test]
    fn position_and_get_follow_order() {
        let queue = queue_with_orders(&[1, 2, 3], &[3, 1, 2]);

        assert_eq!(queue.position(QueueOrder::Canonical, MediaId::new(3)), Some(2));
        assert_eq!(queue.position(QueueOrder::Shuffled, MediaId::new(3)), Some(0));
        assert_eq!(queue.get(QueueOrder::Shuffled, 1).map(|m| m.id.get()), Some(1));
        assert!(queue.get(QueueOrder::Canonical, 3).is_none());
    }

    #[test]
    fn clear_queue() {
        let mut queue = queue_with_orders(&[1, 2], &[2, 1]);
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.shuffled().is_empty());
    }
}
