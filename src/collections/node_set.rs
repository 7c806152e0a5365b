//! `NodeSet` — a bit set over dense node indices.
//!
//! Backed by `u64` words for efficient space usage and fast set operations
//! (union, iteration) using bitwise logic. Every algorithm in this crate that
//! tracks visited or reachable nodes does so with a `NodeSet`.

/// An unordered membership set over dense node indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeSet {
    words: Vec<u64>,
    /// Number of set bits.
    len: usize,
}

impl NodeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set sized for indices `0..bits`.
    pub fn with_len(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64)],
            len: 0,
        }
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all members, keeping the allocation.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
        self.len = 0;
    }

    /// Adds an index to the set. Returns `true` if it was not already present.
    pub fn insert(&mut self, bit: usize) -> bool {
        let word_idx = bit / 64;
        let mask = 1u64 << (bit % 64);

        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }

        let word = &mut self.words[word_idx];
        if *word & mask == 0 {
            *word |= mask;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Removes an index from the set. Returns `true` if it was present.
    pub fn remove(&mut self, bit: usize) -> bool {
        let word_idx = bit / 64;
        if word_idx >= self.words.len() {
            return false;
        }
        let mask = 1u64 << (bit % 64);
        let word = &mut self.words[word_idx];
        if *word & mask != 0 {
            *word &= !mask;
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, bit: usize) -> bool {
        self.words
            .get(bit / 64)
            .is_some_and(|w| w & (1u64 << (bit % 64)) != 0)
    }

    /// Adds every member of `other` to `self`.
    pub fn union_with(&mut self, other: &NodeSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        let mut len = 0usize;
        for (i, w) in self.words.iter_mut().enumerate() {
            if let Some(&ow) = other.words.get(i) {
                *w |= ow;
            }
            len += w.count_ones() as usize;
        }
        self.len = len;
    }

    /// Iterates over members in ascending index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl FromIterator<usize> for NodeSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        for bit in iter {
            set.insert(bit);
        }
        set
    }
}

/// Ascending iterator over the members of a [`NodeSet`].
pub struct Iter<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(self.word_idx * 64 + bit)
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contains_remove() {
        let mut set = NodeSet::with_len(100);
        assert!(set.insert(3));
        assert!(set.insert(64));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(64));
        assert!(!set.contains(65));

        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn grows_past_initial_size() {
        let mut set = NodeSet::with_len(10);
        assert!(set.insert(500));
        assert!(set.contains(500));
    }

    #[test]
    fn iterates_in_ascending_order() {
        let set: NodeSet = [65, 2, 0, 130].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 2, 65, 130]);
    }

    #[test]
    fn union_merges_members() {
        let mut a: NodeSet = [1, 2].into_iter().collect();
        let b: NodeSet = [2, 300].into_iter().collect();
        a.union_with(&b);
        assert_eq!(a.len(), 3);
        assert!(a.contains(300));
    }
}
