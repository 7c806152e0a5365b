//! # `gantry` — directed-graph scheduling for lab-automation protocols
//!
//! A small, self-contained directed-graph algorithms library that decides the
//! execution order of protocol steps and assigns each step to a physical or
//! human device while minimizing hand-off cost. It underlies an instruction
//! compiler: upstream code builds a dependency graph of protocol commands,
//! this crate orders, reduces, and partitions it, and downstream code turns
//! the result into device instructions.
//!
//! ## What's here
//!
//! - **Graph contract** ([`Graph`]): a read-only view — node count,
//!   node-by-index, out-degree, out-edge-by-index. Every algorithm operates
//!   purely against it. Costs never live on the graph; they arrive through
//!   caller callbacks.
//! - **Traversal** ([`visit`], [`visit_tree`]): iterative DFS/BFS with
//!   first-visit/revisit callbacks, an early-termination sentinel
//!   ([`Error::Stop`]), and breadth-first frontier recording.
//! - **Ordering** ([`topo_sort`], [`is_dag`], [`Schedule`], [`waves`]):
//!   three-color DFS producing a dependencies-first order or a cycle witness,
//!   and a Kahn wave scheduler.
//! - **Derived graphs** ([`transitive_reduction`], [`eliminate`],
//!   [`reaches`], [`reverse`]): minimal-edge reduction, node contraction that
//!   preserves path structure, and cycle-aware reachability.
//! - **Shortest paths** ([`shortest_paths`]): multi-source Dijkstra with a
//!   decrease-key heap and lazy edge weights.
//! - **Tree partitioning** ([`partition_tree`], [`partition_tree_approx`]):
//!   the centerpiece — exact bottom-up DP and a Dijkstra-based heuristic for
//!   assigning a device (color) to every step of a protocol tree at minimum
//!   total hand-off cost.
//!
//! ## Design
//!
//! Node identities are opaque (`Copy + Eq + Hash`) and are interned to dense
//! `usize` indices once, at graph construction; all hot loops run on indices.
//! Everything is single-threaded and pure per call: no globals, no caches
//! outliving a call, no locks. Traversals use explicit stacks, never
//! recursion, so adversarially deep graphs cannot overflow.
//!
//! ## Example
//!
//! ```rust
//! use gantry::{Builder, Graph, partition_tree, PartitionTreeOpt};
//!
//! // mix -> incubate -> read
//! let mut b = Builder::new();
//! for step in ["mix", "incubate", "read"] {
//!     b.add_node(step).unwrap();
//! }
//! b.add_edge("mix", "incubate").unwrap();
//! b.add_edge("incubate", "read").unwrap();
//! let protocol = b.build();
//!
//! // Device 0 is a liquid handler, 1 a plate hotel; moving a plate between
//! // devices costs 5.
//! let part = partition_tree(PartitionTreeOpt {
//!     tree: &protocol,
//!     root: 0,
//!     colors: |_| vec![0, 1],
//!     edge_weight: |a, b| if a == b { 0 } else { 5 },
//! })
//! .unwrap();
//! assert_eq!(part.weight, 0);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]

pub mod algo;
pub mod collections;
pub mod error;
pub mod graph;
pub mod traverse;

pub use algo::{
    eliminate, is_dag, partition_tree, partition_tree_approx, reachability, reaches,
    shortest_paths, topo_sort, topo_sort_by, transitive_reduction, waves, Color, EliminateOpt,
    PartitionReport, PartitionTreeOpt, Schedule, ShortestPathOpt, TreePartition,
};
pub use collections::{DisjointSet, MinHeap, NodeSet};
pub use error::Error;
pub use graph::{
    by_node, components, reverse, stats, AdjGraph, Builder, Graph, GraphStats, NodeId,
};
pub use traverse::{is_tree, visit, visit_tree, TreeOpt, TreeVisitor, VisitOpt, VisitResult,
    Visitor,
};
