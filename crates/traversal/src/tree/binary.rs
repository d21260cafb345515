//! Arena-backed binary tree that owns its node-label counter

use derive_more::Display;
use log::{debug, warn};
use std::sync::Arc;

use crate::tree::{BinaryNode, NodeId, NodeName, NodeRef, Side, Tree};

/// Errors raised at the tree's mutation boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TreeError {
    /// The target node already has a left and a right child
    #[display(fmt = "node {} already has 2 children", node)]
    CapacityExceeded { node: NodeName },
    /// The target ID does not belong to this tree
    #[display(fmt = "{} is not part of this tree", id)]
    UnknownNode { id: NodeId },
    /// No node carries the requested label
    #[display(fmt = "no node is labelled {}", name)]
    UnknownName { name: NodeName },
}

impl std::error::Error for TreeError {}

/// A shared, immutable view of a tree at one point in time
pub type TreeSnapshot = Arc<BinaryTree>;

/// A binary tree grown one child at a time
///
/// The tree always has a root labelled `1`. New nodes are labelled with the
/// next unused integer and attached as the left child of their parent if it
/// has none yet, otherwise as the right child. Nodes are never removed.
///
/// # Example
///
/// ```
/// use traversal::tree::prelude::*;
///
/// let mut tree = BinaryTree::new();
/// let left = tree.add_child(NodeId::ROOT)?;
/// let right = tree.add_child(NodeId::ROOT)?;
/// assert_eq!((left.name.get(), right.name.get()), (2, 3));
///
/// // A third child is rejected and nothing changes
/// assert!(tree.add_child(NodeId::ROOT).is_err());
/// assert_eq!(tree.next_name().get(), 4);
/// # Ok::<(), TreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BinaryTree {
    /// Arena storage for nodes
    nodes: Vec<BinaryNode>,
    /// Label handed to the next created node
    next_name: NodeName,
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTree {
    /// Create a tree holding only the root node `1`
    pub fn new() -> Self {
        Self {
            nodes: vec![BinaryNode::new(NodeName::FIRST, None)],
            next_name: NodeName::FIRST.next(),
        }
    }

    /// Get a node by its ID
    ///
    /// Returns `None` if the ID is invalid.
    pub fn get(&self, id: NodeId) -> Option<&BinaryNode> {
        self.nodes.get(id.get())
    }

    /// The label the next added node will receive
    pub fn next_name(&self) -> NodeName {
        self.next_name
    }

    /// Append a new child to `target`
    ///
    /// The child goes into the left slot if it is free, otherwise into the
    /// right slot. The label counter only advances on success.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CapacityExceeded`] if `target` already has two
    /// children and [`TreeError::UnknownNode`] if `target` is not in the tree.
    pub fn add_child(&mut self, target: NodeId) -> Result<NodeRef, TreeError> {
        let parent = self
            .nodes
            .get(target.get())
            .ok_or(TreeError::UnknownNode { id: target })?;

        if parent.is_full() {
            warn!("Rejected child for node {}: both slots taken", parent.name);
            return Err(TreeError::CapacityExceeded { node: parent.name });
        }

        let side = if parent.child(Side::Left).is_none() {
            Side::Left
        } else {
            Side::Right
        };

        let id = NodeId::new(self.nodes.len());
        let name = self.next_name;
        self.nodes.push(BinaryNode::new(name, Some(target)));
        self.nodes[target.get()].children.push(id);
        self.next_name = name.next();

        debug!("Added node {} as {} child of {}", name, side, self.nodes[target.get()].name);
        Ok(NodeRef::new(id, name))
    }

    /// Append a new child to the node labelled `name`
    pub fn add_child_to(&mut self, name: NodeName) -> Result<NodeRef, TreeError> {
        let target = self
            .nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeId::new)
            .ok_or(TreeError::UnknownName { name })?;
        self.add_child(target)
    }

    /// IDs of nodes that still have a free child slot, in creation order
    pub fn open_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_full())
            .map(|(index, _)| NodeId::new(index))
            .collect()
    }

    /// Freeze the current state into a shareable snapshot
    pub fn snapshot(&self) -> TreeSnapshot {
        Arc::new(self.clone())
    }
}

impl Tree for BinaryTree {
    fn root(&self) -> Option<NodeId> {
        Some(NodeId::ROOT)
    }

    fn name(&self, id: NodeId) -> Option<NodeName> {
        self.get(id).map(|node| node.name)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    fn child_slots(&self, id: NodeId) -> [Option<NodeId>; 2] {
        match self.get(id) {
            Some(node) => [node.child(Side::Left), node.child(Side::Right)],
            None => [None, None],
        }
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_single_root() {
        let tree = BinaryTree::new();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.name(NodeId::ROOT), Some(NodeName(1)));
        assert!(tree.is_leaf(NodeId::ROOT));
        assert_eq!(tree.next_name(), NodeName(2));
    }

    #[test]
    fn test_add_child_fills_left_then_right() {
        let mut tree = BinaryTree::new();
        let left = tree.add_child(NodeId::ROOT).unwrap();
        let right = tree.add_child(NodeId::ROOT).unwrap();

        assert_eq!(tree.left(NodeId::ROOT), Some(left.id));
        assert_eq!(tree.right(NodeId::ROOT), Some(right.id));
        assert_eq!(left.name, NodeName(2));
        assert_eq!(right.name, NodeName(3));
        assert_eq!(tree.parent(right.id), Some(NodeId::ROOT));
    }

    #[test]
    fn test_names_increase_across_subtrees() {
        let mut tree = BinaryTree::new();
        let two = tree.add_child(NodeId::ROOT).unwrap();
        let three = tree.add_child(two.id).unwrap();
        let four = tree.add_child(NodeId::ROOT).unwrap();

        assert_eq!(three.name, NodeName(3));
        assert_eq!(four.name, NodeName(4));
        assert_eq!(tree.depth(three.id), 2);
    }

    #[test]
    fn test_third_child_rejected() {
        let mut tree = BinaryTree::new();
        tree.add_child(NodeId::ROOT).unwrap();
        tree.add_child(NodeId::ROOT).unwrap();

        let err = tree.add_child(NodeId::ROOT).unwrap_err();
        assert_eq!(err, TreeError::CapacityExceeded { node: NodeName(1) });
        assert_eq!(err.to_string(), "node 1 already has 2 children");
        assert_eq!(tree.child_count(NodeId::ROOT), 2);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.next_name(), NodeName(4));
    }

    #[test]
    fn test_unknown_target_rejected() {
        let mut tree = BinaryTree::new();
        let err = tree.add_child(NodeId(7)).unwrap_err();
        assert_eq!(err, TreeError::UnknownNode { id: NodeId(7) });
        assert_eq!(tree.next_name(), NodeName(2));
    }

    #[test]
    fn test_add_child_by_name() {
        let mut tree = BinaryTree::new();
        tree.add_child_to(NodeName(1)).unwrap();
        let three = tree.add_child_to(NodeName(2)).unwrap();
        assert_eq!(tree.parent(three.id), Some(NodeId(1)));
        assert_eq!(
            tree.add_child_to(NodeName(9)),
            Err(TreeError::UnknownName { name: NodeName(9) })
        );
    }

    #[test]
    fn test_open_nodes() {
        let mut tree = BinaryTree::new();
        tree.add_child(NodeId::ROOT).unwrap();
        tree.add_child(NodeId::ROOT).unwrap();
        assert_eq!(tree.open_nodes(), vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut tree = BinaryTree::new();
        let snapshot = tree.snapshot();
        tree.add_child(NodeId::ROOT).unwrap();

        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(tree.node_count(), 2);
    }
}
