//! Constrained tree coloring: assign one color (device) to every node of a
//! rooted tree, minimizing the summed parent→child hand-off cost.
//!
//! The cost function is evaluated only on parent→child pairs and may be
//! asymmetric. General-graph coloring of this form is NP-hard; rooted trees
//! admit a polynomial exact solution by bottom-up dynamic programming over
//! (node, color) pairs, which [`partition_tree`] implements. For trees or
//! color sets too large for the exact table, [`partition_tree_approx`]
//! repeatedly extracts the cheapest root-to-leaf path through the
//! (node, color) choice DAG with Dijkstra and commits the colors along it —
//! exact on a simple path, a documented approximation (never better than the
//! optimum) on branching trees.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::algo::topo::topo_sort;
use crate::collections::MinHeap;
use crate::error::Error;
use crate::graph::Graph;

/// An assignment choice for a tree node — which device executes the step.
pub type Color = usize;

/// Options for [`partition_tree`] and [`partition_tree_approx`].
pub struct PartitionTreeOpt<'a, G, C, W>
where
    G: Graph,
    C: FnMut(usize) -> Vec<Color>,
    W: FnMut(Color, Color) -> i64,
{
    /// The rooted out-tree to color. The caller owns the tree guarantee;
    /// [`is_tree`](crate::traverse::is_tree) is the available cross-check.
    pub tree: &'a G,
    /// Dense index of the root.
    pub root: usize,
    /// Candidate colors per node. Must be non-empty for every node.
    pub colors: C,
    /// Hand-off cost of a parent colored `a` over a child colored `b`.
    pub edge_weight: W,
}

/// A tree coloring: every tree node mapped to its chosen color, plus the
/// total edge weight of the assignment.
///
/// `weight` always equals the recomputed sum of `edge_weight` over all tree
/// edges under `parts` — both modes derive it from the final assignment.
#[derive(Debug, Clone)]
pub struct TreePartition<N> {
    /// Chosen color per node identity; every tree node appears exactly once.
    pub parts: HashMap<N, Color>,
    /// Total `edge_weight` over all tree edges.
    pub weight: i64,
}

/// A serializable summary of a partition, for compiler diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionReport {
    /// Number of colored nodes.
    pub nodes: usize,
    /// Total hand-off weight.
    pub weight: i64,
    /// Number of distinct colors actually used.
    pub distinct_colors: usize,
}

impl<N> TreePartition<N> {
    /// Summarizes the partition.
    pub fn report(&self) -> PartitionReport {
        let mut used: Vec<Color> = self.parts.values().copied().collect();
        used.sort_unstable();
        used.dedup();
        PartitionReport {
            nodes: self.parts.len(),
            weight: self.weight,
            distinct_colors: used.len(),
        }
    }
}

/// Per-node candidate colors, collected and validated up front.
fn collect_colors<G, C>(tree: &G, colors: &mut C) -> Result<Vec<Vec<Color>>, Error>
where
    G: Graph,
    C: FnMut(usize) -> Vec<Color>,
{
    (0..tree.len())
        .map(|u| {
            let cands = colors(u);
            if cands.is_empty() {
                Err(Error::MissingColors { node: u })
            } else {
                Ok(cands)
            }
        })
        .collect()
}

/// Sums `edge_weight` over every tree edge under the final assignment. Both
/// modes report this recomputed value, so `weight` and `parts` cannot drift.
fn assignment_weight<G, W>(tree: &G, chosen: &[Color], edge_weight: &mut W) -> i64
where
    G: Graph,
    W: FnMut(Color, Color) -> i64,
{
    let mut total = 0i64;
    for u in 0..tree.len() {
        for v in tree.outs(u) {
            total += edge_weight(chosen[u], chosen[v]);
        }
    }
    total
}

fn into_parts<G: Graph>(tree: &G, chosen: Vec<Color>) -> HashMap<G::Node, Color> {
    chosen
        .into_iter()
        .enumerate()
        .map(|(ix, c)| (tree.node(ix), c))
        .collect()
}

/// Finds the minimum-weight coloring of a rooted tree — the true global
/// optimum.
///
/// Memoized bottom-up DP over (node, color) pairs: for each node and each of
/// its candidate colors, the best subtree weight is the sum over children of
/// the cheapest (child color, hand-off) combination. Time and table size are
/// O(nodes × colors²), intended for small candidate sets (≈15×15).
///
/// # Errors
/// [`Error::BadNode`] for an out-of-range root, [`Error::MissingColors`] if
/// any node has no candidates (checked before any computation),
/// [`Error::Cycle`] / [`Error::NotATree`] if the input is not a tree rooted
/// at `opt.root`.
pub fn partition_tree<G, C, W>(
    mut opt: PartitionTreeOpt<'_, G, C, W>,
) -> Result<TreePartition<G::Node>, Error>
where
    G: Graph,
    C: FnMut(usize) -> Vec<Color>,
    W: FnMut(Color, Color) -> i64,
{
    let tree = opt.tree;
    let n = tree.len();
    if opt.root >= n {
        return Err(Error::BadNode { ix: opt.root, len: n });
    }
    let colors = collect_colors(tree, &mut opt.colors)?;
    let order = topo_sort(tree)?; // children before parents

    // best[u][ci]: cheapest weight of u's subtree with u colored
    // colors[u][ci]. choice[u][ci][slot]: the child color index realizing it
    // for u's slot-th child.
    let mut best: Vec<Vec<i64>> = colors.iter().map(|c| vec![0; c.len()]).collect();
    let mut choice: Vec<Vec<Vec<usize>>> = (0..n)
        .map(|u| vec![Vec::new(); colors[u].len()])
        .collect();

    for &u in &order {
        for ci in 0..colors[u].len() {
            let mut total = 0i64;
            let mut picks = Vec::with_capacity(tree.out_degree(u));
            for v in tree.outs(u) {
                let mut best_cost = i64::MAX;
                let mut best_cj = 0usize;
                for cj in 0..colors[v].len() {
                    let cost = best[v][cj] + (opt.edge_weight)(colors[u][ci], colors[v][cj]);
                    if cost < best_cost {
                        best_cost = cost;
                        best_cj = cj;
                    }
                }
                total += best_cost;
                picks.push(best_cj);
            }
            best[u][ci] = total;
            choice[u][ci] = picks;
        }
    }

    // Commit the root's cheapest color, then descend parents-first reading
    // off the recorded choices.
    let mut chosen_ci: Vec<Option<usize>> = vec![None; n];
    for &u in order.iter().rev() {
        if chosen_ci[u].is_none() {
            if u != opt.root {
                // Not reached from the root: the input is not a rooted tree.
                return Err(Error::NotATree { node: u });
            }
            let ci = (0..colors[u].len())
                .min_by_key(|&ci| best[u][ci])
                .unwrap_or(0);
            chosen_ci[u] = Some(ci);
        }
        let ci = chosen_ci[u].unwrap_or(0);
        for (slot, v) in tree.outs(u).enumerate() {
            if chosen_ci[v].is_some() {
                return Err(Error::NotATree { node: v });
            }
            chosen_ci[v] = Some(choice[u][ci][slot]);
        }
    }

    let chosen: Vec<Color> = chosen_ci
        .iter()
        .enumerate()
        .map(|(u, ci)| colors[u][ci.unwrap_or(0)])
        .collect();
    let weight = assignment_weight(tree, &chosen, &mut opt.edge_weight);
    debug!(nodes = n, weight, "exact tree partition");
    Ok(TreePartition {
        parts: into_parts(tree, chosen),
        weight,
    })
}

/// Heuristic polynomial coloring for trees too large for the exact DP.
///
/// Each round runs Dijkstra over the (node, color) choice DAG — committed
/// nodes restricted to their committed color — then commits every color on
/// the cheapest root-to-leaf path found. Distance state invalidated by the
/// commitment (subtrees whose best predecessor left the committed path) is
/// rebuilt on the next round. Rounds repeat until every leaf, and therefore
/// every node, is committed.
///
/// Exact when the tree is a simple path; on branching trees the result is an
/// approximation whose weight is never below the exact optimum.
///
/// # Errors
/// Same conditions as [`partition_tree`].
pub fn partition_tree_approx<G, C, W>(
    mut opt: PartitionTreeOpt<'_, G, C, W>,
) -> Result<TreePartition<G::Node>, Error>
where
    G: Graph,
    C: FnMut(usize) -> Vec<Color>,
    W: FnMut(Color, Color) -> i64,
{
    let tree = opt.tree;
    let n = tree.len();
    if opt.root >= n {
        return Err(Error::BadNode { ix: opt.root, len: n });
    }
    let colors = collect_colors(tree, &mut opt.colors)?;

    // Flattened ids for (node, color-index) pairs.
    let mut offset = vec![0usize; n + 1];
    for u in 0..n {
        offset[u + 1] = offset[u] + colors[u].len();
    }
    let pairs = offset[n];
    let pair_node = {
        let mut map = vec![0usize; pairs];
        for u in 0..n {
            for p in offset[u]..offset[u + 1] {
                map[p] = u;
            }
        }
        map
    };

    let mut committed: Vec<Option<usize>> = vec![None; n];
    let leaves: Vec<usize> = (0..n).filter(|&u| tree.out_degree(u) == 0).collect();
    let allowed = |committed: &[Option<usize>], u: usize| -> std::ops::Range<usize> {
        match committed[u] {
            Some(ci) => ci..ci + 1,
            None => 0..colors[u].len(),
        }
    };

    let mut rounds = 0usize;
    while leaves.iter().any(|&l| committed[l].is_none()) {
        rounds += 1;

        let mut dist: Vec<Option<i64>> = vec![None; pairs];
        let mut pred: Vec<Option<usize>> = vec![None; pairs];
        let mut heap = MinHeap::new(pairs);
        for ci in allowed(&committed, opt.root) {
            let p = offset[opt.root] + ci;
            dist[p] = Some(0);
            heap.push(p, 0);
        }

        while let Some((p, d)) = heap.pop() {
            if dist[p].is_some_and(|best| d > best) {
                continue;
            }
            let u = pair_node[p];
            let ci = p - offset[u];
            for v in tree.outs(u) {
                for cj in allowed(&committed, v) {
                    let q = offset[v] + cj;
                    let nd = d + (opt.edge_weight)(colors[u][ci], colors[v][cj]);
                    if dist[q].is_none_or(|best| nd < best) {
                        dist[q] = Some(nd);
                        pred[q] = Some(p);
                        if heap.contains(q) {
                            heap.decrease(q, nd);
                        } else {
                            heap.push(q, nd);
                        }
                    }
                }
            }
        }

        // Cheapest uncommitted-leaf pair wins this round.
        let mut best_pair: Option<(usize, i64)> = None;
        for &l in &leaves {
            if committed[l].is_some() {
                continue;
            }
            for ci in 0..colors[l].len() {
                let q = offset[l] + ci;
                let Some(d) = dist[q] else {
                    // The leaf never relaxed: it is not reachable from the
                    // root, so this is not a rooted tree.
                    return Err(Error::NotATree { node: l });
                };
                if best_pair.is_none_or(|(_, bd)| d < bd) {
                    best_pair = Some((q, d));
                }
            }
        }
        let Some((mut p, d)) = best_pair else {
            break;
        };

        // Walk the predecessor chain back to the root, committing colors.
        let mut committed_now = 0usize;
        loop {
            let u = pair_node[p];
            if committed[u].is_none() {
                committed[u] = Some(p - offset[u]);
                committed_now += 1;
            }
            match pred[p] {
                Some(prev) => p = prev,
                None => break,
            }
        }
        trace!(round = rounds, path_weight = d, committed_now, "committed path");
    }

    // Every leaf committed commits all of its ancestors; anything left over
    // cannot be part of the rooted tree.
    if let Some(u) = (0..n).find(|&u| committed[u].is_none()) {
        return Err(Error::NotATree { node: u });
    }

    let chosen: Vec<Color> = (0..n)
        .map(|u| colors[u][committed[u].unwrap_or(0)])
        .collect();
    let weight = assignment_weight(tree, &chosen, &mut opt.edge_weight);
    debug!(nodes = n, weight, rounds, "approximate tree partition");
    Ok(TreePartition {
        parts: into_parts(tree, chosen),
        weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjGraph, Builder};

    fn build_tree(
        nodes: &[&'static str],
        edges: &[(&'static str, &'static str)],
    ) -> AdjGraph<&'static str> {
        let mut b = Builder::new();
        for &n in nodes {
            b.add_node(n).unwrap();
        }
        for &(x, y) in edges {
            b.add_edge(x, y).unwrap();
        }
        b.build()
    }

    fn recompute_weight(
        g: &AdjGraph<&'static str>,
        parts: &HashMap<&'static str, Color>,
        mut w: impl FnMut(Color, Color) -> i64,
    ) -> i64 {
        let mut total = 0;
        for u in 0..g.len() {
            for v in g.outs(u) {
                total += w(parts[&g.node(u)], parts[&g.node(v)]);
            }
        }
        total
    }

    #[test]
    fn single_node_single_color_is_free() {
        let g = build_tree(&["only"], &[]);
        let part = partition_tree(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors: |_| vec![7],
            edge_weight: |_, _| 1,
        })
        .unwrap();
        assert_eq!(part.weight, 0);
        assert_eq!(part.parts[&"only"], 7);
    }

    #[test]
    fn shared_color_costs_nothing() {
        // Uniform candidates and same-color-is-free: one shared color wins.
        let g = build_tree(
            &["r", "a", "b", "c"],
            &[("r", "a"), ("r", "b"), ("a", "c")],
        );
        let weight = |a: Color, b: Color| i64::from(a != b);
        for part in [
            partition_tree(PartitionTreeOpt {
                tree: &g,
                root: 0,
                colors: |_| vec![0, 1, 2],
                edge_weight: weight,
            })
            .unwrap(),
            partition_tree_approx(PartitionTreeOpt {
                tree: &g,
                root: 0,
                colors: |_| vec![0, 1, 2],
                edge_weight: weight,
            })
            .unwrap(),
        ] {
            assert_eq!(part.weight, 0);
            let c = part.parts[&"r"];
            assert!(part.parts.values().all(|&x| x == c));
        }
    }

    #[test]
    fn every_node_is_colored_exactly_once() {
        let g = build_tree(
            &["r", "a", "b", "c", "d"],
            &[("r", "a"), ("r", "b"), ("b", "c"), ("b", "d")],
        );
        let part = partition_tree(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors: |ix| vec![ix, ix + 1],
            edge_weight: |a, b| (a as i64 - b as i64).abs(),
        })
        .unwrap();
        assert_eq!(part.parts.len(), 5);
        for name in ["r", "a", "b", "c", "d"] {
            assert!(part.parts.contains_key(&name));
        }
    }

    #[test]
    fn exact_finds_the_true_optimum() {
        // Root must bridge children that prefer opposite colors; the optimum
        // pays exactly one mismatched edge.
        let g = build_tree(&["r", "left", "right"], &[("r", "left"), ("r", "right")]);
        let colors = |ix: usize| match ix {
            0 => vec![0, 1],
            1 => vec![0],
            _ => vec![1],
        };
        let part = partition_tree(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors,
            edge_weight: |a, b| i64::from(a != b) * 10,
        })
        .unwrap();
        assert_eq!(part.weight, 10);
    }

    #[test]
    fn weight_matches_recomputed_sum_in_both_modes() {
        let g = build_tree(
            &["r", "a", "b", "c", "d", "e"],
            &[("r", "a"), ("r", "b"), ("a", "c"), ("a", "d"), ("b", "e")],
        );
        let colors = |ix: usize| vec![ix % 3, (ix + 1) % 3];
        let w = |a: Color, b: Color| ((3 + a * 2) as i64) * i64::from(a != b) + b as i64;

        let exact = partition_tree(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors,
            edge_weight: w,
        })
        .unwrap();
        assert_eq!(exact.weight, recompute_weight(&g, &exact.parts, w));

        let approx = partition_tree_approx(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors,
            edge_weight: w,
        })
        .unwrap();
        assert_eq!(approx.weight, recompute_weight(&g, &approx.parts, w));

        assert!(exact.weight <= approx.weight);
    }

    #[test]
    fn approx_is_exact_on_a_simple_path() {
        let g = build_tree(
            &["s1", "s2", "s3", "s4"],
            &[("s1", "s2"), ("s2", "s3"), ("s3", "s4")],
        );
        let colors = |ix: usize| if ix % 2 == 0 { vec![0, 1] } else { vec![1, 2] };
        let w = |a: Color, b: Color| (a as i64 + 1) * i64::from(a != b);

        let exact = partition_tree(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors,
            edge_weight: w,
        })
        .unwrap();
        let approx = partition_tree_approx(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors,
            edge_weight: w,
        })
        .unwrap();
        assert_eq!(exact.weight, approx.weight);
    }

    #[test]
    fn empty_color_set_fails_fast() {
        let g = build_tree(&["r", "a"], &[("r", "a")]);
        let err = partition_tree(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors: |ix| if ix == 1 { Vec::new() } else { vec![0] },
            edge_weight: |_, _| 0,
        })
        .unwrap_err();
        assert_eq!(err, Error::MissingColors { node: 1 });

        let err = partition_tree_approx(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors: |ix| if ix == 1 { Vec::new() } else { vec![0] },
            edge_weight: |_, _| 0,
        })
        .unwrap_err();
        assert_eq!(err, Error::MissingColors { node: 1 });
    }

    #[test]
    fn report_summarizes_the_assignment() {
        let g = build_tree(&["r", "a"], &[("r", "a")]);
        let part = partition_tree(PartitionTreeOpt {
            tree: &g,
            root: 0,
            colors: |_| vec![3, 4],
            edge_weight: |a, b| i64::from(a != b),
        })
        .unwrap();
        let report = part.report();
        assert_eq!(report.nodes, 2);
        assert_eq!(report.weight, 0);
        assert_eq!(report.distinct_colors, 1);
    }
}
