//! Kahn's-algorithm wave scheduler.
//!
//! [`Schedule`] tracks per-node remaining in-degree and the current ready
//! frontier. The downstream instruction compiler drives it incrementally to
//! coalesce repeated device commands wave by wave; [`waves`] drains it in one
//! call. It is also the wave source for transitive reduction.

use tracing::trace;

use crate::error::Error;
use crate::graph::Graph;

#[derive(Clone, Copy, PartialEq)]
enum State {
    Waiting,
    Ready,
    Visited,
}

/// Incremental Kahn scheduler state for one graph.
///
/// Each node must be visited exactly once, and only once all of its
/// predecessors have been visited.
pub struct Schedule {
    /// Adjacency snapshot, so the scheduler owns everything it needs.
    outs: Vec<Vec<usize>>,
    indeg: Vec<usize>,
    state: Vec<State>,
    roots: Vec<usize>,
    remaining: usize,
}

impl Schedule {
    /// Captures the dependency state of `g`.
    pub fn new<G: Graph>(g: &G) -> Self {
        let n = g.len();
        let outs: Vec<Vec<usize>> = (0..n).map(|u| g.outs(u).collect()).collect();
        let mut indeg = vec![0usize; n];
        for targets in &outs {
            for &v in targets {
                indeg[v] += 1;
            }
        }

        let mut state = vec![State::Waiting; n];
        let mut roots = Vec::new();
        for u in 0..n {
            if indeg[u] == 0 {
                state[u] = State::Ready;
                roots.push(u);
            }
        }

        Self {
            outs,
            indeg,
            state,
            roots,
            remaining: n,
        }
    }

    /// The current ready frontier: nodes whose predecessors have all been
    /// visited, in ascending discovery order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Returns `true` once every node has been visited.
    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }

    /// Marks a ready node visited, decrementing its successors' remaining
    /// in-degree. Returns the successors that just became ready.
    ///
    /// # Errors
    /// [`Error::Revisit`] if `ix` was already visited, [`Error::NotReady`] if
    /// it still has unvisited predecessors, [`Error::BadNode`] if out of
    /// range.
    pub fn visit(&mut self, ix: usize) -> Result<Vec<usize>, Error> {
        let len = self.state.len();
        if ix >= len {
            return Err(Error::BadNode { ix, len });
        }
        match self.state[ix] {
            State::Visited => return Err(Error::Revisit { node: ix }),
            State::Waiting => return Err(Error::NotReady { node: ix }),
            State::Ready => {}
        }

        self.state[ix] = State::Visited;
        self.remaining -= 1;
        if let Some(slot) = self.roots.iter().position(|&r| r == ix) {
            self.roots.remove(slot);
        }

        let mut ready = Vec::new();
        // Iterate by index: handing out `&self.outs[ix]` would alias the
        // states we mutate.
        for i in 0..self.outs[ix].len() {
            let v = self.outs[ix][i];
            self.indeg[v] -= 1;
            if self.indeg[v] == 0 {
                self.state[v] = State::Ready;
                self.roots.push(v);
                ready.push(v);
            }
        }
        Ok(ready)
    }
}

/// Drains a full wave partition of `g`: wave 0 is the initial frontier, wave
/// `k + 1` the nodes made ready by wave `k`. Every node lands in exactly one
/// wave.
///
/// # Errors
/// [`Error::Cycle`] if some nodes can never become ready.
pub fn waves<G: Graph>(g: &G) -> Result<Vec<Vec<usize>>, Error> {
    let mut schedule = Schedule::new(g);
    let mut waves = Vec::new();
    let mut frontier = schedule.roots().to_vec();

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &u in &frontier {
            next.extend(schedule.visit(u)?);
        }
        trace!(wave = waves.len(), width = frontier.len(), "scheduled wave");
        waves.push(frontier);
        frontier = next;
    }

    if !schedule.is_done() {
        // Kahn stalled, so a cycle exists; the DFS pass names a node on it.
        let witness = schedule
            .state
            .iter()
            .position(|&s| s != State::Visited)
            .unwrap_or(0);
        return Err(crate::algo::is_dag(g)
            .err()
            .unwrap_or(Error::Cycle { node: witness }));
    }

    Ok(waves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjGraph, Builder};

    fn diamond() -> AdjGraph<u32> {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let mut b = Builder::new();
        for n in 0u32..4 {
            b.add_node(n).unwrap();
        }
        b.add_edge(0, 1).unwrap();
        b.add_edge(0, 2).unwrap();
        b.add_edge(1, 3).unwrap();
        b.add_edge(2, 3).unwrap();
        b.build()
    }

    #[test]
    fn waves_partition_the_node_set() {
        let g = diamond();
        let waves = waves(&g).unwrap();
        assert_eq!(waves, vec![vec![0], vec![1, 2], vec![3]]);

        let mut all: Vec<usize> = waves.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3]);
    }

    #[test]
    fn visit_returns_newly_ready_successors() {
        let g = diamond();
        let mut s = Schedule::new(&g);
        assert_eq!(s.roots(), &[0]);

        assert_eq!(s.visit(0).unwrap(), vec![1, 2]);
        assert_eq!(s.visit(1).unwrap(), Vec::<usize>::new());
        assert_eq!(s.visit(2).unwrap(), vec![3]);
        assert_eq!(s.visit(3).unwrap(), Vec::<usize>::new());
        assert!(s.is_done());
    }

    #[test]
    fn each_node_is_visited_exactly_once() {
        let g = diamond();
        let mut s = Schedule::new(&g);
        s.visit(0).unwrap();
        assert_eq!(s.visit(0), Err(Error::Revisit { node: 0 }));
        assert_eq!(s.visit(3), Err(Error::NotReady { node: 3 }));
    }

    #[test]
    fn cyclic_graphs_cannot_be_scheduled() {
        let mut b = Builder::new();
        for n in 0u32..3 {
            b.add_node(n).unwrap();
        }
        b.add_edge(0, 1).unwrap();
        b.add_edge(1, 2).unwrap();
        b.add_edge(2, 1).unwrap();
        let g = b.build();

        assert!(matches!(waves(&g), Err(Error::Cycle { .. })));
    }
}
