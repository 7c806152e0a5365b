//! Multi-source Dijkstra with lazy edge weights and decrease-key.
//!
//! Edge weights are evaluated on demand through a caller callback, so the
//! graph itself stays weight-free. With non-negative weights this is textbook
//! Dijkstra; improved distances additionally re-queue already-settled nodes,
//! which keeps the result correct for negative weights over acyclic graphs
//! (the transitive-reduction use). Negative cycles are the caller's
//! responsibility and are undefined behavior here, not detected.

use std::collections::HashMap;

use crate::collections::MinHeap;
use crate::error::Error;
use crate::graph::Graph;

/// Options for [`shortest_paths`].
pub struct ShortestPathOpt<'a, G: Graph, W: FnMut(usize, usize) -> i64> {
    /// The graph to search.
    pub graph: &'a G,
    /// Dense indices of the sources; each starts at distance 0.
    pub sources: &'a [usize],
    /// Weight of the edge between two dense indices, queried lazily per edge
    /// relaxation.
    pub weight: W,
}

/// Computes, for every reachable node, the minimum total edge weight of any
/// source-to-node path.
///
/// Unreachable nodes are simply absent from the map; every source maps to 0.
///
/// # Errors
/// [`Error::BadNode`] if a source index is out of range.
pub fn shortest_paths<G: Graph, W: FnMut(usize, usize) -> i64>(
    mut opt: ShortestPathOpt<'_, G, W>,
) -> Result<HashMap<usize, i64>, Error> {
    let n = opt.graph.len();
    let mut dist: HashMap<usize, i64> = HashMap::new();
    let mut heap = MinHeap::new(n);

    for &s in opt.sources {
        if s >= n {
            return Err(Error::BadNode { ix: s, len: n });
        }
        if dist.insert(s, 0).is_none() {
            heap.push(s, 0);
        }
    }

    while let Some((u, d)) = heap.pop() {
        if dist.get(&u).is_some_and(|&best| d > best) {
            // Stale entry superseded by a later improvement.
            continue;
        }
        for v in opt.graph.outs(u) {
            let nd = d + (opt.weight)(u, v);
            let improved = dist.get(&v).is_none_or(|&best| nd < best);
            if !improved {
                continue;
            }
            dist.insert(v, nd);
            if heap.contains(v) {
                heap.decrease(v, nd);
            } else {
                // Either never queued, or settled and now improved via a
                // negative edge; both re-enter the frontier.
                heap.push(v, nd);
            }
        }
    }

    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjGraph, Builder};

    fn weighted(
        nodes: u32,
        edges: &[(u32, u32, i64)],
    ) -> (AdjGraph<u32>, HashMap<(usize, usize), i64>) {
        let mut b = Builder::new();
        for n in 0..nodes {
            b.add_node(n).unwrap();
        }
        let mut weights = HashMap::new();
        for &(x, y, w) in edges {
            b.add_edge(x, y).unwrap();
            weights.insert((x as usize, y as usize), w);
        }
        (b.build(), weights)
    }

    #[test]
    fn single_source_distances() {
        let (g, w) = weighted(
            5,
            &[(0, 1, 4), (0, 2, 1), (2, 1, 1), (1, 3, 2), (2, 3, 6)],
        );
        let dist = shortest_paths(ShortestPathOpt {
            graph: &g,
            sources: &[0],
            weight: |u, v| w[&(u, v)],
        })
        .unwrap();

        assert_eq!(dist[&0], 0);
        assert_eq!(dist[&1], 2); // via 2
        assert_eq!(dist[&2], 1);
        assert_eq!(dist[&3], 4); // 0 -> 2 -> 1 -> 3
        assert!(!dist.contains_key(&4)); // unreachable: absent, not +inf
    }

    #[test]
    fn multi_source_takes_the_nearest_source() {
        let (g, w) = weighted(4, &[(0, 2, 10), (1, 2, 1), (2, 3, 1)]);
        let dist = shortest_paths(ShortestPathOpt {
            graph: &g,
            sources: &[0, 1],
            weight: |u, v| w[&(u, v)],
        })
        .unwrap();

        assert_eq!(dist[&0], 0);
        assert_eq!(dist[&1], 0);
        assert_eq!(dist[&2], 1);
        assert_eq!(dist[&3], 2);
    }

    #[test]
    fn negative_weights_over_a_dag() {
        // Longest-path trick: all edges weigh -1.
        let (g, _) = weighted(4, &[(0, 1, 0), (1, 3, 0), (0, 2, 0), (2, 3, 0), (0, 3, 0)]);
        let dist = shortest_paths(ShortestPathOpt {
            graph: &g,
            sources: &[0],
            weight: |_, _| -1,
        })
        .unwrap();

        assert_eq!(dist[&0], 0);
        assert_eq!(dist[&1], -1);
        assert_eq!(dist[&2], -1);
        assert_eq!(dist[&3], -2); // two hops beat the direct edge
    }

    #[test]
    fn bad_source_is_rejected() {
        let (g, _) = weighted(2, &[(0, 1, 1)]);
        let err = shortest_paths(ShortestPathOpt {
            graph: &g,
            sources: &[5],
            weight: |_, _| 1,
        })
        .unwrap_err();
        assert_eq!(err, Error::BadNode { ix: 5, len: 2 });
    }
}
