//! Rooted out-tree walking: `is_tree` and the pre/post-order `visit_tree`.
//!
//! `visit_tree` assumes the caller hands it a rooted out-tree (no node
//! reachable along two root paths). [`is_tree`] is the cross-check for that
//! guarantee; it is deliberately not invoked automatically, since the
//! guarantee usually falls out of how the tree was built.

use crate::collections::NodeSet;
use crate::error::Error;
use crate::graph::Graph;

/// A pre- or post-order tree callback.
///
/// Receives `(node, parent, last_error)` where `parent` is `None` at the
/// root and `last_error` is the most recent non-sentinel error any callback
/// produced earlier in this walk.
pub type TreeVisitor<'a> = dyn FnMut(usize, Option<usize>, Option<&Error>) -> Result<(), Error> + 'a;

/// Options for [`visit_tree`].
pub struct TreeOpt<'a, G: Graph> {
    /// The tree to walk. Must be a rooted out-tree at `root`.
    pub tree: &'a G,
    /// Dense index of the root.
    pub root: usize,
    /// Fires before a node's children are walked.
    pub pre: Option<&'a mut TreeVisitor<'a>>,
    /// Fires after a node's children are walked.
    pub post: Option<&'a mut TreeVisitor<'a>>,
}

impl<'a, G: Graph> TreeOpt<'a, G> {
    /// Options with no callbacks attached.
    pub fn new(tree: &'a G, root: usize) -> Self {
        Self {
            tree,
            root,
            pre: None,
            post: None,
        }
    }
}

/// Checks that `g` is a rooted out-tree at `root`: every node is reached
/// from the root by exactly one path.
///
/// # Errors
/// [`Error::BadNode`] for an out-of-range root; [`Error::NotATree`] naming a
/// node that is unreachable or reached twice.
pub fn is_tree<G: Graph>(g: &G, root: usize) -> Result<(), Error> {
    let n = g.len();
    if root >= n {
        return Err(Error::BadNode { ix: root, len: n });
    }

    let mut reached = NodeSet::with_len(n);
    reached.insert(root);
    let mut stack = vec![root];
    while let Some(u) = stack.pop() {
        for v in g.outs(u) {
            if !reached.insert(v) {
                // Second path into v (shared child, back edge, or the root).
                return Err(Error::NotATree { node: v });
            }
            stack.push(v);
        }
    }

    (0..n)
        .find(|&u| !reached.contains(u))
        .map_or(Ok(()), |u| Err(Error::NotATree { node: u }))
}

/// A walk frame: each node is pushed once for its pre-visit and once for its
/// post-visit.
enum Frame {
    Pre(usize, Option<usize>),
    Post(usize, Option<usize>),
}

/// Iterative pre/post-order walk of a rooted out-tree.
///
/// Error policy:
/// - `Err(Error::Stop)` from either callback aborts the whole walk
///   immediately and yields `Ok(())` (the sentinel supersedes any remembered
///   error),
/// - any other error from `pre` prunes that node's children, but the node's
///   already-scheduled `post` frame still fires,
/// - the last non-sentinel error is remembered, passed to later callbacks,
///   and returned at the end.
///
/// # Errors
/// [`Error::BadNode`] for an out-of-range root, otherwise the last
/// non-sentinel callback error.
pub fn visit_tree<G: Graph>(mut opt: TreeOpt<'_, G>) -> Result<(), Error> {
    let n = opt.tree.len();
    if opt.root >= n {
        return Err(Error::BadNode { ix: opt.root, len: n });
    }

    let mut last_err: Option<Error> = None;
    let mut stack = vec![Frame::Pre(opt.root, None)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Pre(node, parent) => {
                stack.push(Frame::Post(node, parent));
                let verdict = opt
                    .pre
                    .as_mut()
                    .map_or(Ok(()), |f| f(node, parent, last_err.as_ref()));
                match verdict {
                    Ok(()) => {
                        // Reverse push keeps children in adjacency order.
                        for i in (0..opt.tree.out_degree(node)).rev() {
                            stack.push(Frame::Pre(opt.tree.out(node, i), Some(node)));
                        }
                    }
                    Err(Error::Stop) => return Ok(()),
                    Err(e) => last_err = Some(e),
                }
            }
            Frame::Post(node, parent) => {
                let verdict = opt
                    .post
                    .as_mut()
                    .map_or(Ok(()), |f| f(node, parent, last_err.as_ref()));
                match verdict {
                    Ok(()) => {}
                    Err(Error::Stop) => return Ok(()),
                    Err(e) => last_err = Some(e),
                }
            }
        }
    }

    match last_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
