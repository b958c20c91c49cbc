use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Min-priority open set used by the route search.
///
/// Entries are ordered by priority ascending; equal priorities come out in
/// insertion order. There is no decrease-key: re-prioritising an item means
/// inserting it again, and the caller is expected to discard the stale copy
/// when it surfaces.
#[derive(Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    next_sequence: u64,
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn insert(&mut self, item: T, priority: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            item,
            priority: FloatOrd(priority),
            sequence,
        });
    }

    /// Remove and return the entry with the lowest priority.
    pub fn extract_min(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|entry| (entry.item, entry.priority.0))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug)]
struct FrontierEntry<T> {
    item: T,
    priority: FloatOrd,
    sequence: u64,
}

impl<T> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> {}

impl<T> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
