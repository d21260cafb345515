//! Core node types for the binary tree

use derive_more::Display;
use smallvec::SmallVec;
use std::fmt;

/// Unique identifier for a node within a tree
///
/// Internally represented as an index into an arena-based storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node always has ID 0
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new NodeId from a usize
    pub const fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Get the inner usize value
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// The visible label of a node
///
/// Labels are handed out sequentially by the owning tree, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct NodeName(pub u32);

impl NodeName {
    /// Label of the initial root node
    pub const FIRST: NodeName = NodeName(1);

    /// The label following this one
    pub const fn next(self) -> Self {
        NodeName(self.0 + 1)
    }

    /// Get the inner label value
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeName {
    fn from(name: u32) -> Self {
        NodeName(name)
    }
}

/// A read-only reference to a node: its arena slot plus its label
///
/// This is what step records and canvas calls carry around. It is `Copy`
/// so a playback run never has to borrow the tree it was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", name)]
pub struct NodeRef {
    pub id: NodeId,
    pub name: NodeName,
}

impl NodeRef {
    pub const fn new(id: NodeId, name: NodeName) -> Self {
        Self { id, name }
    }
}

/// Which child slot of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Side {
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
}

impl Side {
    /// Index of this side in a node's ordered children
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// A single node of a [`BinaryTree`](super::BinaryTree)
#[derive(Debug, Clone)]
pub struct BinaryNode {
    /// The node's label
    pub name: NodeName,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    /// Ordered children: index 0 is the left child, index 1 the right one
    pub(crate) children: SmallVec<[NodeId; 2]>,
}

impl BinaryNode {
    pub(crate) fn new(name: NodeName, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: SmallVec::new(),
        }
    }

    /// Ordered children of this node
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The child in the given slot, if present
    pub fn child(&self, side: Side) -> Option<NodeId> {
        self.children.get(side.index()).copied()
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if both child slots are taken
    pub fn is_full(&self) -> bool {
        self.children.len() >= 2
    }
}
