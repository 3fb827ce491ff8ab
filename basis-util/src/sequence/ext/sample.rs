use core::cmp::Ordering;
use std::collections::BinaryHeap;

use basis_core::sequence::Items;
use basis_core::RandomSource;

// Reservoir slot. The heap keeps the largest draw on top so it is the first
// to be evicted.
struct Entry<T> {
    key: f64,
    index: usize,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.total_cmp(&other.key)
    }
}

/// Keeps the `n` elements with the smallest uniform draws, never holding
/// more than `n + 1` of them at once, and returns them in original order.
pub(super) fn sample<I, R>(items: I, n: usize, random: &mut R) -> Items<I::Item>
where
    I: Iterator,
    R: RandomSource + ?Sized,
{
    let mut reservoir = BinaryHeap::with_capacity(n.saturating_add(1).min(1024));
    for (index, item) in items.enumerate() {
        let key = random.next_f64();
        if reservoir.len() < n {
            reservoir.push(Entry { key, index, item });
        } else if reservoir.peek().map_or(false, |top: &Entry<_>| key < top.key) {
            reservoir.pop();
            reservoir.push(Entry { key, index, item });
        }
    }

    let mut kept = reservoir.into_vec();
    kept.sort_unstable_by_key(|entry| entry.index);
    kept.into_iter().map(|entry| entry.item).collect()
}
