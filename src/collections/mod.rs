//! Support collections shared by the graph algorithms: a dense bit set, a
//! union-find, and a decrease-key binary heap.

pub mod disjoint_set;
pub mod min_heap;
pub mod node_set;

pub use disjoint_set::DisjointSet;
pub use min_heap::MinHeap;
pub use node_set::NodeSet;
