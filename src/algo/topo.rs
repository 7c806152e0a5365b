//! Topological ordering and cycle detection via three-color DFS.
//!
//! The DFS is iterative — an explicit stack of `(node, next-child)` resume
//! frames — so deep dependency chains cannot overflow the call stack.

use std::cmp::Ordering;

use crate::error::Error;
use crate::graph::Graph;

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    White,
    Grey,
    Black,
}

/// Computes a topological order of `g` with the default deterministic
/// tie-break (ascending dense index).
///
/// The order lists dependencies first: for every edge `(a, b)`, `b` appears
/// before `a`.
///
/// # Errors
/// [`Error::Cycle`] naming a node on a cycle if `g` is not a DAG.
pub fn topo_sort<G: Graph>(g: &G) -> Result<Vec<usize>, Error> {
    topo_sort_by(g, |a, b| a.cmp(&b))
}

/// Computes a topological order of `g`, breaking ties between sibling
/// candidates with `cmp` (smaller-first). Never relies on nondeterministic
/// iteration for output order.
///
/// # Errors
/// [`Error::Cycle`] naming a node on a cycle if `g` is not a DAG.
pub fn topo_sort_by<G: Graph>(
    g: &G,
    mut cmp: impl FnMut(usize, usize) -> Ordering,
) -> Result<Vec<usize>, Error> {
    let n = g.len();

    // Materialize comparator-sorted root and child orders up front so the
    // walk itself stays branch-light.
    let mut roots: Vec<usize> = (0..n).collect();
    roots.sort_by(|&a, &b| cmp(a, b));
    let mut children: Vec<Vec<usize>> = (0..n).map(|u| g.outs(u).collect()).collect();
    for list in &mut children {
        list.sort_by(|&a, &b| cmp(a, b));
    }

    let mut mark = vec![Mark::White; n];
    let mut order = Vec::with_capacity(n);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in roots {
        if mark[root] != Mark::White {
            continue;
        }
        mark[root] = Mark::Grey;
        stack.push((root, 0));

        while let Some((u, i)) = stack.pop() {
            if let Some(&v) = children[u].get(i) {
                stack.push((u, i + 1));
                match mark[v] {
                    Mark::White => {
                        mark[v] = Mark::Grey;
                        stack.push((v, 0));
                    }
                    // A grey node is on the active DFS path, so this edge
                    // closes a cycle through v.
                    Mark::Grey => return Err(Error::Cycle { node: v }),
                    Mark::Black => {}
                }
            } else {
                mark[u] = Mark::Black;
                order.push(u);
            }
        }
    }

    Ok(order)
}

/// Checks that `g` is acyclic.
///
/// # Errors
/// [`Error::Cycle`] naming a node on a cycle.
pub fn is_dag<G: Graph>(g: &G) -> Result<(), Error> {
    topo_sort(g).map(|_| ())
}
