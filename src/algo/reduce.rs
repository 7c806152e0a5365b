//! Transitive reduction of a DAG.
//!
//! Produces the minimal-edge graph with the same nodes and the same
//! reachability relation as the input. An edge `u -> v` is redundant exactly
//! when some longer `u -> ... -> v` path exists; longest-path distances from
//! `u` expose that, computed as shortest paths with every edge weighing -1
//! (valid on a DAG, where no negative cycles exist). Overall O(V·E).

use tracing::debug;

use crate::algo::schedule::waves;
use crate::algo::shortest_path::{shortest_paths, ShortestPathOpt};
use crate::error::Error;
use crate::graph::{AdjGraph, Builder, Graph};

/// Computes the transitive reduction of `g`.
///
/// The output preserves node identities and their dense indices; only
/// redundant edges are dropped.
///
/// # Errors
/// [`Error::Cycle`] if `g` is not a DAG (the reduction is only well-defined
/// on DAGs).
pub fn transitive_reduction<G: Graph>(g: &G) -> Result<AdjGraph<G::Node>, Error> {
    let mut reduced = Builder::with_capacity(g.len());
    for ix in 0..g.len() {
        reduced.add_node(g.node(ix))?;
    }

    // Kahn waves double as the acyclicity check.
    let order = waves(g)?;
    let mut dropped = 0usize;
    for u in order.into_iter().flatten() {
        if g.out_degree(u) == 0 {
            continue;
        }
        let dist = shortest_paths(ShortestPathOpt {
            graph: g,
            sources: &[u],
            weight: |_, _| -1,
        })?;
        for v in g.outs(u) {
            // dist[v] < -1 means an indirect path reaches v, making the
            // direct edge redundant.
            if dist.get(&v) == Some(&-1) {
                reduced.add_edge_ix(u, v)?;
            } else {
                dropped += 1;
            }
        }
    }

    debug!(dropped, "transitive reduction complete");
    Ok(reduced.build())
}
