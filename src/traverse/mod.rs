//! Iterative graph and tree traversal.

pub mod tree;
pub mod visit;

pub use tree::{is_tree, visit_tree, TreeOpt, TreeVisitor};
pub use visit::{visit, VisitOpt, VisitResult, Visitor};
