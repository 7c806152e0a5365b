//! Generic DFS/BFS traversal with first-visit and revisit callbacks.
//!
//! Both orders use explicit worklists (a stack or a `VecDeque`), never the
//! call stack, so adversarially deep graphs cannot overflow. Callbacks steer
//! the walk through their return value:
//! - `Err(Error::Stop)` halts the entire walk; the result so far is still
//!   returned, since the sentinel is control flow, not a failure,
//! - any other error prunes the current node's subtree but the walk continues
//!   elsewhere,
//! - `Ok(())` continues normally.

use std::collections::{HashMap, VecDeque};

use crate::collections::NodeSet;
use crate::error::Error;
use crate::graph::Graph;

/// A traversal callback. Receives the dense index of the node.
pub type Visitor<'a> = dyn FnMut(usize) -> Result<(), Error> + 'a;

/// Options for [`visit`].
pub struct VisitOpt<'a, G: Graph> {
    /// The graph to walk.
    pub graph: &'a G,
    /// Dense index of the start node.
    pub root: usize,
    /// Called once per node on first encounter.
    pub visitor: Option<&'a mut Visitor<'a>>,
    /// Called each time an already-visited node is re-encountered.
    pub seen: Option<&'a mut Visitor<'a>>,
    /// Breadth-first instead of the default depth-first order.
    pub breadth_first: bool,
}

impl<'a, G: Graph> VisitOpt<'a, G> {
    /// Options for a plain depth-first walk with no callbacks.
    pub fn new(graph: &'a G, root: usize) -> Self {
        Self {
            graph,
            root,
            visitor: None,
            seen: None,
            breadth_first: false,
        }
    }
}

/// The outcome of a [`visit`] walk.
#[derive(Debug, Clone, Default)]
pub struct VisitResult {
    /// Every node reached (including pruned nodes themselves).
    pub visited: NodeSet,
    /// Breadth-first only: distance from the root per reached node.
    pub dist: HashMap<usize, usize>,
    /// Breadth-first only: the nodes at each distance from the root.
    pub frontiers: Vec<Vec<usize>>,
}

/// Walks `opt.graph` from `opt.root`.
///
/// # Errors
/// [`Error::BadNode`] if the root index is out of range. Callback errors are
/// control flow (see module docs) and are not surfaced here.
pub fn visit<G: Graph>(opt: VisitOpt<'_, G>) -> Result<VisitResult, Error> {
    let n = opt.graph.len();
    if opt.root >= n {
        return Err(Error::BadNode { ix: opt.root, len: n });
    }
    if opt.breadth_first {
        breadth_first(opt)
    } else {
        depth_first(opt)
    }
}

/// What a callback decided about the node it was shown.
enum Verdict {
    Expand,
    Prune,
    Halt,
}

fn apply(cb: &mut Option<&mut Visitor<'_>>, ix: usize) -> Verdict {
    match cb.as_mut().map_or(Ok(()), |f| f(ix)) {
        Ok(()) => Verdict::Expand,
        Err(Error::Stop) => Verdict::Halt,
        Err(_) => Verdict::Prune,
    }
}

fn depth_first<G: Graph>(mut opt: VisitOpt<'_, G>) -> Result<VisitResult, Error> {
    let mut result = VisitResult {
        visited: NodeSet::with_len(opt.graph.len()),
        ..VisitResult::default()
    };

    let mut stack = Vec::new();
    result.visited.insert(opt.root);
    match apply(&mut opt.visitor, opt.root) {
        Verdict::Expand => stack.push(opt.root),
        Verdict::Prune => {}
        Verdict::Halt => return Ok(result),
    }

    while let Some(u) = stack.pop() {
        for v in opt.graph.outs(u) {
            if result.visited.contains(v) {
                if let Verdict::Halt = apply(&mut opt.seen, v) {
                    return Ok(result);
                }
                continue;
            }
            result.visited.insert(v);
            match apply(&mut opt.visitor, v) {
                Verdict::Expand => stack.push(v),
                Verdict::Prune => {}
                Verdict::Halt => return Ok(result),
            }
        }
    }

    Ok(result)
}

fn breadth_first<G: Graph>(mut opt: VisitOpt<'_, G>) -> Result<VisitResult, Error> {
    let mut result = VisitResult {
        visited: NodeSet::with_len(opt.graph.len()),
        ..VisitResult::default()
    };

    let mut queue = VecDeque::new();
    result.visited.insert(opt.root);
    result.dist.insert(opt.root, 0);
    result.frontiers.push(vec![opt.root]);
    match apply(&mut opt.visitor, opt.root) {
        Verdict::Expand => queue.push_back(opt.root),
        Verdict::Prune => {}
        Verdict::Halt => return Ok(result),
    }

    while let Some(u) = queue.pop_front() {
        let depth = result.dist[&u];
        for v in opt.graph.outs(u) {
            if result.visited.contains(v) {
                if let Verdict::Halt = apply(&mut opt.seen, v) {
                    return Ok(result);
                }
                continue;
            }
            result.visited.insert(v);
            result.dist.insert(v, depth + 1);
            if result.frontiers.len() <= depth + 1 {
                result.frontiers.resize(depth + 2, Vec::new());
            }
            result.frontiers[depth + 1].push(v);
            match apply(&mut opt.visitor, v) {
                Verdict::Expand => queue.push_back(v),
                Verdict::Prune => {}
                Verdict::Halt => return Ok(result),
            }
        }
    }

    // Trailing empty levels can appear when the deepest frontier was pruned.
    while result.frontiers.last().is_some_and(Vec::is_empty) {
        result.frontiers.pop();
    }

    Ok(result)
}
