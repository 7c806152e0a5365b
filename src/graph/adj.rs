//! `AdjGraph` — the node-list + adjacency-list graph container.
//!
//! This is the output container for every algorithm that materializes a new
//! graph (reverse, transitive reduction, elimination, reachability), and the
//! usual way callers assemble an input graph. [`Builder`] interns each opaque
//! node identity to a dense index exactly once; after `build`, all adjacency
//! is index slices and no hashing happens in algorithm hot loops.

use std::collections::HashMap;

use crate::error::Error;
use crate::graph::{Graph, NodeId};

/// A built directed graph: interned node list plus index adjacency lists.
///
/// Immutable once built; algorithms only read it.
#[derive(Debug, Clone)]
pub struct AdjGraph<N: NodeId> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    outs: Vec<Vec<usize>>,
}

impl<N: NodeId> AdjGraph<N> {
    /// Re-checks the structural invariants: one dense index per identity and
    /// every adjacency entry inside the node list.
    pub fn verify(&self) -> Result<(), Error> {
        if self.index.len() != self.nodes.len() {
            // Interning makes this unreachable through Builder; a hand-rolled
            // or corrupted graph can still trip it.
            for (ix, &n) in self.nodes.iter().enumerate() {
                if self.index.get(&n) != Some(&ix) {
                    return Err(Error::DuplicateNode(format!("{n:?}")));
                }
            }
        }
        for (from, outs) in self.outs.iter().enumerate() {
            for &to in outs {
                if to >= self.nodes.len() {
                    return Err(Error::BadEdge { from, to });
                }
            }
        }
        Ok(())
    }

    /// The adjacency slice of the node at `ix`.
    ///
    /// # Panics
    /// Panics if `ix` is out of range.
    pub fn out_slice(&self, ix: usize) -> &[usize] {
        &self.outs[ix]
    }
}

impl<N: NodeId> Graph for AdjGraph<N> {
    type Node = N;

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, ix: usize) -> N {
        self.nodes[ix]
    }

    fn index_of(&self, node: N) -> Option<usize> {
        self.index.get(&node).copied()
    }

    fn out_degree(&self, ix: usize) -> usize {
        self.outs[ix].len()
    }

    fn out(&self, ix: usize, i: usize) -> usize {
        self.outs[ix][i]
    }
}

/// Incrementally assembles an [`AdjGraph`].
#[derive(Debug, Clone, Default)]
pub struct Builder<N: NodeId> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    outs: Vec<Vec<usize>>,
}

impl<N: NodeId> Builder<N> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            outs: Vec::new(),
        }
    }

    /// Creates an empty builder sized for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            outs: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes added so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes have been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node, assigning it the next dense index.
    ///
    /// # Errors
    /// [`Error::DuplicateNode`] if the identity was added before.
    pub fn add_node(&mut self, node: N) -> Result<usize, Error> {
        if self.index.contains_key(&node) {
            return Err(Error::DuplicateNode(format!("{node:?}")));
        }
        Ok(self.intern(node))
    }

    /// Adds a node if absent; either way returns its dense index.
    pub fn intern(&mut self, node: N) -> usize {
        if let Some(&ix) = self.index.get(&node) {
            return ix;
        }
        let ix = self.nodes.len();
        self.nodes.push(node);
        self.index.insert(node, ix);
        self.outs.push(Vec::new());
        ix
    }

    /// Adds a directed edge between two previously added identities.
    ///
    /// # Errors
    /// [`Error::MissingNode`] if either endpoint was never added.
    pub fn add_edge(&mut self, from: N, to: N) -> Result<(), Error> {
        let from_ix = self
            .index
            .get(&from)
            .copied()
            .ok_or_else(|| Error::MissingNode(format!("{from:?}")))?;
        let to_ix = self
            .index
            .get(&to)
            .copied()
            .ok_or_else(|| Error::MissingNode(format!("{to:?}")))?;
        self.outs[from_ix].push(to_ix);
        Ok(())
    }

    /// Adds a directed edge by dense indices.
    ///
    /// # Errors
    /// [`Error::BadNode`] if either index is out of range.
    pub fn add_edge_ix(&mut self, from: usize, to: usize) -> Result<(), Error> {
        let len = self.nodes.len();
        if from >= len {
            return Err(Error::BadNode { ix: from, len });
        }
        if to >= len {
            return Err(Error::BadNode { ix: to, len });
        }
        self.outs[from].push(to);
        Ok(())
    }

    /// Finishes the graph.
    pub fn build(self) -> AdjGraph<N> {
        AdjGraph {
            nodes: self.nodes,
            index: self.index,
            outs: self.outs,
        }
    }
}
