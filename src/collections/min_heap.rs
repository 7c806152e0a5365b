//! `MinHeap` — a binary min-heap keyed by dense node indices with
//! O(log n) decrease-key.
//!
//! Each key's current heap slot is tracked in a positions table, so an
//! arbitrary entry's priority can be lowered and re-sifted without a scan.
//! This is what Dijkstra relaxation needs from its frontier queue.

/// Sentinel slot for "key not in the heap".
const ABSENT: usize = usize::MAX;

/// A binary min-heap over `(key, priority)` pairs with decrease-key.
///
/// Keys are dense indices in `0..capacity`; each key may be present at most
/// once. Misuse (out-of-range key, double push, decrease of an absent key)
/// is a caller bug and panics.
#[derive(Debug, Clone)]
pub struct MinHeap {
    /// Heap-ordered `(key, priority)` pairs.
    items: Vec<(usize, i64)>,
    /// `pos[key]` is the key's current slot in `items`, or `ABSENT`.
    pos: Vec<usize>,
}

impl MinHeap {
    /// Creates an empty heap accepting keys in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            pos: vec![ABSENT; capacity],
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if `key` is currently queued.
    #[inline]
    pub fn contains(&self, key: usize) -> bool {
        self.pos[key] != ABSENT
    }

    /// Returns the queued priority of `key`, if present.
    pub fn priority(&self, key: usize) -> Option<i64> {
        match self.pos[key] {
            ABSENT => None,
            slot => Some(self.items[slot].1),
        }
    }

    /// Pushes a new entry.
    ///
    /// # Panics
    /// Panics if `key` is already present or out of range.
    pub fn push(&mut self, key: usize, priority: i64) {
        assert!(self.pos[key] == ABSENT, "key {key} already queued");
        let slot = self.items.len();
        self.items.push((key, priority));
        self.pos[key] = slot;
        self.sift_up(slot);
    }

    /// Pops the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<(usize, i64)> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.swap_slots(0, last);
        let (key, priority) = self.items.pop()?;
        self.pos[key] = ABSENT;
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some((key, priority))
    }

    /// Lowers the priority of a queued entry and restores heap order.
    ///
    /// # Panics
    /// Panics if `key` is absent or the new priority is larger than the
    /// queued one.
    pub fn decrease(&mut self, key: usize, priority: i64) {
        let slot = self.pos[key];
        assert!(slot != ABSENT, "key {key} not queued");
        assert!(
            priority <= self.items[slot].1,
            "decrease-key must not raise priority"
        );
        self.items[slot].1 = priority;
        self.sift_up(slot);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.items[slot].1 < self.items[parent].1 {
                self.swap_slots(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && self.items[right].1 < self.items[left].1 {
                smallest = right;
            }
            if self.items[smallest].1 < self.items[slot].1 {
                self.swap_slots(slot, smallest);
                slot = smallest;
            } else {
                break;
            }
        }
    }

    /// Swaps two slots, keeping the positions table in sync.
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        self.pos[self.items[a].0] = a;
        self.pos[self.items[b].0] = b;
    }
}
