//! Node elimination: contract out a filtered node subset while preserving
//! path structure among the survivors.
//!
//! Every eliminated node is bypassed by reconnecting its predecessors
//! directly to the nodes its out-edges ultimately resolve to. Resolution runs
//! in topological order (dependencies first), so a node's successor set is
//! fully resolved before the node itself is contracted.

use crate::algo::topo::topo_sort;
use crate::collections::NodeSet;
use crate::error::Error;
use crate::graph::{AdjGraph, Builder, Graph};

/// Options for [`eliminate`].
pub struct EliminateOpt<'a, G: Graph, F: FnMut(usize) -> bool> {
    /// The graph to contract.
    pub graph: &'a G,
    /// Survival predicate: `true` keeps the node, `false` contracts it away.
    pub keep: F,
    /// Keep duplicate edges introduced by contraction instead of
    /// deduplicating them.
    pub keep_multi_edges: bool,
}

/// Contracts out every node failing `opt.keep`.
///
/// The output contains exactly the surviving nodes (in their original
/// relative order); an edge `u -> w` exists when the input had a path
/// `u -> x₁ -> ... -> xₖ -> w` whose interior nodes were all eliminated
/// (k may be 0).
///
/// # Errors
/// [`Error::Cycle`] if `opt.graph` is not a DAG — the contraction order is
/// derived from a topological order.
pub fn eliminate<G: Graph, F: FnMut(usize) -> bool>(
    mut opt: EliminateOpt<'_, G, F>,
) -> Result<AdjGraph<G::Node>, Error> {
    let g = opt.graph;
    let n = g.len();
    let order = topo_sort(g)?;

    let kept: Vec<bool> = (0..n).map(|u| (opt.keep)(u)).collect();

    // resolved[u]: the surviving nodes u stands for — u itself if kept,
    // otherwise everything its out-edges resolve to. Dependencies-first
    // order guarantees successors are resolved before u.
    let mut resolved: Vec<Vec<usize>> = vec![Vec::new(); n];
    for u in order {
        if kept[u] {
            resolved[u].push(u);
        } else {
            let mut targets = Vec::new();
            for v in g.outs(u) {
                targets.extend_from_slice(&resolved[v]);
            }
            resolved[u] = targets;
        }
    }

    let mut b = Builder::with_capacity(n);
    let mut new_ix = vec![usize::MAX; n];
    for u in 0..n {
        if kept[u] {
            new_ix[u] = b.add_node(g.node(u))?;
        }
    }

    let mut dedup = NodeSet::with_len(n);
    for u in 0..n {
        if !kept[u] {
            continue;
        }
        dedup.clear();
        for v in g.outs(u) {
            for &w in &resolved[v] {
                if opt.keep_multi_edges || dedup.insert(w) {
                    b.add_edge_ix(new_ix[u], new_ix[w])?;
                }
            }
        }
    }

    Ok(b.build())
}
