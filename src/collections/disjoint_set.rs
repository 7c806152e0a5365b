//! Disjoint Set (Union-Find) over dense node indices.
//!
//! # Performance
//!
//! - Parent pointers and ranks live in flat vectors for cache locality.
//! - Path compression and union-by-rank give nearly constant time operations.

/// A Disjoint Set (Union-Find) data structure.
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    /// Parent pointers.
    parent: Vec<usize>,
    /// Rank (depth upper bound) for union-by-rank.
    rank: Vec<u8>,
}

impl DisjointSet {
    /// Creates a new empty disjoint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new disjoint set with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
        }
    }

    /// Creates a disjoint set of `n` singleton sets.
    pub fn singletons(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Creates a new set containing a single element.
    /// Returns the representative ID of the new set.
    pub fn make_set(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        id
    }

    /// Finds the representative of the set containing `id`, fully compressing
    /// the path from `id` to the root.
    ///
    /// # Panics
    /// Panics if `id` was never created.
    pub fn find(&mut self, id: usize) -> usize {
        // Two-pass approach: find the root, then point every node on the
        // walked path directly at it.
        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut curr = id;
        while curr != root {
            let next = self.parent[curr];
            self.parent[curr] = root;
            curr = next;
        }

        root
    }

    /// Unites the sets containing `id1` and `id2`.
    /// Returns `true` if they were in different sets, `false` otherwise.
    pub fn union(&mut self, id1: usize, id2: usize) -> bool {
        let root1 = self.find(id1);
        let root2 = self.find(id2);

        if root1 == root2 {
            return false;
        }

        let rank1 = self.rank[root1];
        let rank2 = self.rank[root2];

        if rank1 < rank2 {
            self.parent[root1] = root2;
        } else if rank1 > rank2 {
            self.parent[root2] = root1;
        } else {
            self.parent[root2] = root1;
            self.rank[root1] += 1;
        }

        true
    }

    /// Returns the number of elements in the disjoint set.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_their_own_representatives() {
        let mut ds = DisjointSet::singletons(4);
        for i in 0..4 {
            assert_eq!(ds.find(i), i);
        }
    }

    #[test]
    fn union_merges_and_reports() {
        let mut ds = DisjointSet::singletons(5);
        assert!(ds.union(0, 1));
        assert!(ds.union(1, 2));
        assert!(!ds.union(0, 2));
        assert_eq!(ds.find(0), ds.find(2));
        assert_ne!(ds.find(0), ds.find(3));
    }

    #[test]
    fn find_compresses_paths() {
        let mut ds = DisjointSet::singletons(8);
        // Build a chain by rigging parents directly through unions.
        for i in 0..7 {
            ds.union(i, i + 1);
        }
        let root = ds.find(0);
        // After compression every element points straight at the root.
        for i in 0..8 {
            assert_eq!(ds.parent[i], root);
        }
    }

    #[test]
    fn make_set_appends() {
        let mut ds = DisjointSet::new();
        let a = ds.make_set();
        let b = ds.make_set();
        assert_ne!(ds.find(a), ds.find(b));
        assert_eq!(ds.len(), 2);
    }
}
