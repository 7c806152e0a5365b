//! The read-only graph contract and derived graph containers.
//!
//! Every algorithm in this crate operates purely against the [`Graph`] trait:
//! node count, node-by-index, out-degree, and out-edge-by-index. Graphs carry
//! no weights; costs are supplied out-of-band through caller callbacks, which
//! decouples topology from cost models.
//!
//! Node identities are opaque to the algorithms. Each identity is interned to
//! a stable dense `usize` index when a graph is built, and all hot loops run
//! on dense indices; the identity resurfaces only at the API boundary via
//! [`Graph::node`].

pub mod adj;
pub mod dot;

pub use adj::{AdjGraph, Builder};

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::collections::DisjointSet;
use crate::error::Error;

/// Bounds required of an opaque node identity.
///
/// Graphs never own node data; they hold only this identity (often a small id
/// or a `&T` reference into caller-owned data).
pub trait NodeId: Copy + Eq + Hash + fmt::Debug {}

impl<T: Copy + Eq + Hash + fmt::Debug> NodeId for T {}

/// A read-only directed graph.
///
/// Implementations expose nodes as dense indices `0..len()`; `out(ix, i)`
/// yields the dense index of the `i`-th successor. Algorithms never mutate a
/// graph, only read it.
pub trait Graph {
    /// The opaque node identity at the API boundary.
    type Node: NodeId;

    /// Number of nodes.
    fn len(&self) -> usize;

    /// Returns `true` if the graph has no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The identity of the node at dense index `ix`.
    ///
    /// # Panics
    /// May panic if `ix` is out of range.
    fn node(&self, ix: usize) -> Self::Node;

    /// The dense index of `node`, if it is in the graph.
    fn index_of(&self, node: Self::Node) -> Option<usize>;

    /// Out-degree of the node at `ix`.
    fn out_degree(&self, ix: usize) -> usize;

    /// Dense index of the `i`-th out-neighbor of the node at `ix`.
    fn out(&self, ix: usize, i: usize) -> usize;

    /// Iterates over the out-neighbors of the node at `ix`.
    fn outs(&self, ix: usize) -> Outs<'_, Self>
    where
        Self: Sized,
    {
        Outs {
            graph: self,
            ix,
            next: 0,
            degree: self.out_degree(ix),
        }
    }

    /// Total number of directed edges.
    fn edge_count(&self) -> usize
    where
        Self: Sized,
    {
        (0..self.len()).map(|u| self.out_degree(u)).sum()
    }
}

/// Iterator over a node's out-neighbors.
pub struct Outs<'a, G: Graph> {
    graph: &'a G,
    ix: usize,
    next: usize,
    degree: usize,
}

impl<G: Graph> Iterator for Outs<'_, G> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.degree {
            return None;
        }
        let out = self.graph.out(self.ix, self.next);
        self.next += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.degree - self.next;
        (rest, Some(rest))
    }
}

/// Builds the edge-reversed copy of `g`.
///
/// Node identities and their dense indices are preserved; every edge
/// `u -> v` becomes `v -> u`.
pub fn reverse<G: Graph>(g: &G) -> Result<AdjGraph<G::Node>, Error> {
    let mut b = Builder::with_capacity(g.len());
    for ix in 0..g.len() {
        b.add_node(g.node(ix))?;
    }
    for u in 0..g.len() {
        for v in g.outs(u) {
            b.add_edge_ix(v, u)?;
        }
    }
    Ok(b.build())
}

/// Computes the weakly connected components of `g`.
///
/// Returns a vector where index `ix` holds the component representative of
/// the node at `ix` (edge direction is ignored).
pub fn components<G: Graph>(g: &G) -> Vec<usize> {
    let n = g.len();
    let mut ds = DisjointSet::singletons(n);
    for u in 0..n {
        for v in g.outs(u) {
            ds.union(u, v);
        }
    }
    (0..n).map(|u| ds.find(u)).collect()
}

/// Degree statistics about a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of directed edges.
    pub edge_count: usize,
    /// Minimum out-degree over all nodes.
    pub min_out_degree: usize,
    /// Maximum out-degree over all nodes.
    pub max_out_degree: usize,
    /// Median out-degree over all nodes.
    pub median_out_degree: usize,
    /// Average out-degree (`m / n`).
    pub mean_out_degree: f64,
}

/// Computes basic degree statistics for `g`.
pub fn stats<G: Graph>(g: &G) -> GraphStats {
    let node_count = g.len();
    let edge_count = g.edge_count();

    let mut degrees: Vec<usize> = (0..node_count).map(|u| g.out_degree(u)).collect();
    degrees.sort_unstable();

    let min_out_degree = degrees.first().copied().unwrap_or(0);
    let max_out_degree = degrees.last().copied().unwrap_or(0);
    let median_out_degree = if degrees.is_empty() {
        0
    } else if degrees.len() % 2 == 0 {
        (degrees[degrees.len() / 2 - 1] + degrees[degrees.len() / 2]) / 2
    } else {
        degrees[degrees.len() / 2]
    };

    GraphStats {
        node_count,
        edge_count,
        min_out_degree,
        max_out_degree,
        median_out_degree,
        mean_out_degree: if node_count == 0 {
            0.0
        } else {
            edge_count as f64 / node_count as f64
        },
    }
}

/// Translates a dense-index map into an identity-keyed map.
///
/// Handy at the API boundary when an algorithm result keyed by dense indices
/// must be reported in terms of the caller's node identities.
pub fn by_node<G: Graph, V: Clone>(g: &G, by_ix: &HashMap<usize, V>) -> HashMap<G::Node, V> {
    by_ix
        .iter()
        .map(|(&ix, v)| (g.node(ix), v.clone()))
        .collect()
}
