//! Graph algorithms: ordering, scheduling, reduction, contraction,
//! reachability, shortest paths, and tree partitioning.

pub mod eliminate;
pub mod partition;
pub mod reach;
pub mod reduce;
pub mod schedule;
pub mod shortest_path;
pub mod topo;

pub use eliminate::{eliminate, EliminateOpt};
pub use partition::{
    partition_tree, partition_tree_approx, Color, PartitionReport, PartitionTreeOpt,
    TreePartition,
};
pub use reach::{reachability, reaches};
pub use reduce::transitive_reduction;
pub use schedule::{waves, Schedule};
pub use shortest_path::{shortest_paths, ShortestPathOpt};
pub use topo::{is_dag, topo_sort, topo_sort_by};
