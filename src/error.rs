//! Error taxonomy for graph construction and algorithms.
//!
//! Errors fall into three failure families plus one control-flow sentinel:
//! - structural: the graph itself is malformed (`DuplicateNode`, `MissingNode`,
//!   `BadNode`, `BadEdge`, `NotATree`),
//! - cycle: an expected-acyclic graph contains a cycle (`Cycle`),
//! - config: malformed options (`MissingColors`, `Revisit`, `NotReady`),
//! - `Stop`: the early-termination sentinel for traversals. Returning it from a
//!   visitor halts the walk; it is matched by variant identity, never by
//!   message text, and is not a failure.
//!
//! Algorithms fail fast with one of these variants instead of panicking.
//! Internal invariant violations (e.g. a corrupted heap slot) are library bugs
//! and may panic.

use thiserror::Error;

/// Errors produced by graph builders and algorithms.
///
/// Variants that carry a `node` carry the dense node index of the input graph;
/// map it back to the caller's identity with [`Graph::node`](crate::Graph::node).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The same node identity was added to a builder twice.
    #[error("duplicate node {0}")]
    DuplicateNode(String),

    /// An edge endpoint was never added to the builder.
    #[error("unknown node {0}")]
    MissingNode(String),

    /// A dense node index is out of range for the graph.
    #[error("node index {ix} out of range for graph of {len} nodes")]
    BadNode {
        /// The offending index.
        ix: usize,
        /// Number of nodes in the graph.
        len: usize,
    },

    /// An adjacency entry points outside the node list.
    #[error("edge {from} -> {to} leaves the node set")]
    BadEdge {
        /// Source node index.
        from: usize,
        /// Target node index.
        to: usize,
    },

    /// An expected-acyclic graph contains a cycle. `node` lies on one.
    #[error("graph contains a cycle through node index {node}")]
    Cycle {
        /// A node participating in the cycle.
        node: usize,
    },

    /// The graph is not a rooted out-tree at the given root.
    #[error("not a tree: node index {node} is unreachable or multiply reached")]
    NotATree {
        /// The node violating the tree shape.
        node: usize,
    },

    /// A tree node has an empty candidate color set.
    #[error("no candidate colors for node index {node}")]
    MissingColors {
        /// The node with no candidates.
        node: usize,
    },

    /// A scheduler node was visited twice.
    #[error("node index {node} scheduled twice")]
    Revisit {
        /// The node visited again.
        node: usize,
    },

    /// A scheduler node was visited before its dependencies completed.
    #[error("node index {node} visited before its dependencies")]
    NotReady {
        /// The node that is not yet ready.
        node: usize,
    },

    /// Early-termination sentinel: stop the traversal. Not a failure.
    #[error("traversal stopped")]
    Stop,
}

impl Error {
    /// Returns `true` for the early-termination sentinel.
    #[inline]
    pub fn is_stop(&self) -> bool {
        matches!(self, Error::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_identified_by_variant() {
        assert!(Error::Stop.is_stop());
        assert!(!Error::Cycle { node: 3 }.is_stop());
    }

    #[test]
    fn cycle_message_names_the_node() {
        let msg = Error::Cycle { node: 7 }.to_string();
        assert!(msg.contains('7'));
    }
}
