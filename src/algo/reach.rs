//! Cycle-aware reachability: for every node, the set of nodes reachable via
//! at least one edge.
//!
//! A node contains itself exactly when it lies on a cycle reachable from
//! itself. Rather than re-walking the graph per node, the computation runs
//! once over the strongly connected components (Kosaraju's two-pass DFS) and
//! merges already-resolved component sets in reverse topological order — the
//! "reuse a solved peer's set" shortcut, done safely.

use crate::collections::NodeSet;
use crate::error::Error;
use crate::graph::{AdjGraph, Builder, Graph};

/// Kosaraju's algorithm. Returns `(comp, count)` where `comp[v]` is the
/// component id of node `v`. Component ids are a topological order of the
/// condensation: every edge goes from a lower id to a higher or equal id.
fn strongly_connected_components<G: Graph>(g: &G) -> (Vec<usize>, usize) {
    let n = g.len();

    let mut transpose = vec![Vec::<usize>::new(); n];
    for u in 0..n {
        for v in g.outs(u) {
            transpose[v].push(u);
        }
    }

    // First pass: iterative DFS, recording finishing order.
    let mut visited = NodeSet::with_len(n);
    let mut finish = Vec::with_capacity(n);
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for start in 0..n {
        if !visited.insert(start) {
            continue;
        }
        stack.push((start, 0));
        while let Some((u, i)) = stack.pop() {
            if i < g.out_degree(u) {
                stack.push((u, i + 1));
                let v = g.out(u, i);
                if visited.insert(v) {
                    stack.push((v, 0));
                }
            } else {
                finish.push(u);
            }
        }
    }

    // Second pass: flood the transpose in reverse finishing order.
    let mut comp = vec![usize::MAX; n];
    let mut count = 0usize;
    for &start in finish.iter().rev() {
        if comp[start] != usize::MAX {
            continue;
        }
        comp[start] = count;
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            for &v in &transpose[u] {
                if comp[v] == usize::MAX {
                    comp[v] = count;
                    stack.push(v);
                }
            }
        }
        count += 1;
    }

    (comp, count)
}

/// Computes, for every node, the set of nodes reachable via one or more
/// edges. `result[v].contains(v)` holds exactly when `v` is on a cycle.
pub fn reaches<G: Graph>(g: &G) -> Vec<NodeSet> {
    let n = g.len();
    let (comp, count) = strongly_connected_components(g);

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); count];
    for v in 0..n {
        members[comp[v]].push(v);
    }

    // A component is cyclic if it has more than one member or a self-loop.
    let mut cyclic = vec![false; count];
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); count];
    for u in 0..n {
        for v in g.outs(u) {
            if comp[u] == comp[v] {
                cyclic[comp[u]] = true;
            } else {
                succs[comp[u]].push(comp[v]);
            }
        }
    }
    for c in 0..count {
        if members[c].len() > 1 {
            cyclic[c] = true;
        }
    }

    // Component ids are topologically ordered, so walking them backwards
    // guarantees every successor component is already fully resolved and its
    // set can be merged instead of recomputed.
    let mut comp_reach: Vec<NodeSet> = (0..count).map(|_| NodeSet::with_len(n)).collect();
    for c in (0..count).rev() {
        let mut set = NodeSet::with_len(n);
        if cyclic[c] {
            for &v in &members[c] {
                set.insert(v);
            }
        }
        for i in 0..succs[c].len() {
            let sc = succs[c][i];
            for &v in &members[sc] {
                set.insert(v);
            }
            set.union_with(&comp_reach[sc]);
        }
        comp_reach[c] = set;
    }

    (0..n).map(|v| comp_reach[comp[v]].clone()).collect()
}

/// Materializes the full reachability relation as a graph: one edge
/// `u -> w` for every `w` reachable from `u`.
///
/// Beware the size: a dense relation holds O(V²) edges.
///
/// # Errors
/// [`Error::DuplicateNode`] if `g` repeats a node identity.
pub fn reachability<G: Graph>(g: &G) -> Result<AdjGraph<G::Node>, Error> {
    let sets = reaches(g);
    let mut b = Builder::with_capacity(g.len());
    for ix in 0..g.len() {
        b.add_node(g.node(ix))?;
    }
    for (u, set) in sets.iter().enumerate() {
        for w in set {
            b.add_edge_ix(u, w)?;
        }
    }
    Ok(b.build())
}
