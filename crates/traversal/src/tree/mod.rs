//! Binary tree model
//!
//! This module provides the arena-backed [`BinaryTree`] that the front end
//! mutates, and the read-only [`Tree`] trait that traversal generators and
//! the breadth-first scheduler consume.

mod binary;
mod node;
mod traits;

pub use binary::{BinaryTree, TreeError, TreeSnapshot};
pub use node::{BinaryNode, NodeId, NodeName, NodeRef, Side};
pub use traits::{Children, TraversalOrder, Tree, TreeTraversal, TreeWalker};

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        BinaryTree, NodeId, NodeName, NodeRef, Side, TraversalOrder, Tree, TreeError,
        TreeSnapshot, TreeTraversal,
    };
}
