//! Debug-only dot-format text dump of a graph.
//!
//! Emits a printable `digraph` string for eyeballing dependency structure.
//! There is no parser and no stability guarantee on the output; it exists so
//! a failing compilation can be pasted into a graph viewer.

use std::fmt::Write as _;

use crate::graph::Graph;

/// Renders `g` as dot text, labeling each node with `label`.
pub fn print<G: Graph>(g: &G, name: &str, mut label: impl FnMut(usize) -> String) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph {name} {{");
    for ix in 0..g.len() {
        let _ = writeln!(out, "    {:?};", label(ix));
    }
    for u in 0..g.len() {
        for v in g.outs(u) {
            let _ = writeln!(out, "    {:?} -> {:?};", label(u), label(v));
        }
    }
    out.push_str("}\n");
    out
}
