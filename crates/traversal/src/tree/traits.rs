//! Core tree traits for binary tree structures

use crate::tree::{NodeId, NodeName, NodeRef, Side};
use std::collections::{HashSet, VecDeque};

/// Iterator over the present children of a node, left before right
pub type Children = std::iter::Flatten<std::array::IntoIter<Option<NodeId>, 2>>;

/// A read-only view of a binary tree
///
/// This trait is what traversal generators and the breadth-first scheduler
/// consume. Implementations expose exactly two ordered child slots per node;
/// a structure that stores more children must only report the first two.
///
/// # Example
///
/// ```
/// use traversal::tree::prelude::*;
///
/// let mut tree = BinaryTree::new();
/// let two = tree.add_child(NodeId::ROOT).unwrap();
/// tree.add_child(two.id).unwrap();
///
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.left(NodeId::ROOT), Some(two.id));
/// assert_eq!(tree.right(NodeId::ROOT), None);
/// ```
pub trait Tree {
    /// Get the root node ID
    ///
    /// Returns `None` for an empty tree.
    fn root(&self) -> Option<NodeId>;

    /// Get the label of a node
    ///
    /// Returns `None` if the ID is invalid.
    fn name(&self, id: NodeId) -> Option<NodeName>;

    /// Get the parent of a node
    ///
    /// Returns `None` for the root node.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// The left and right child slots of a node
    ///
    /// Both slots are `None` for leaves and invalid IDs. The slots are
    /// independent: a node may have a right child and no left one.
    fn child_slots(&self, id: NodeId) -> [Option<NodeId>; 2];

    /// Count total nodes in the tree
    fn node_count(&self) -> usize;

    /// The child in the given slot
    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.child_slots(id)[side.index()]
    }

    /// The left child of a node
    fn left(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Side::Left)
    }

    /// The right child of a node
    fn right(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Side::Right)
    }

    /// Iterate over the present children of a node, left to right
    fn children(&self, id: NodeId) -> Children {
        self.child_slots(id).into_iter().flatten()
    }

    /// Count children of a node
    fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Check if a node has no children
    fn is_leaf(&self, id: NodeId) -> bool {
        self.child_count(id) == 0
    }

    /// A copyable reference to a node
    ///
    /// Returns `None` if the ID is invalid.
    fn node_ref(&self, id: NodeId) -> Option<NodeRef> {
        self.name(id).map(|name| NodeRef::new(id, name))
    }

    /// Get the depth of a node (root = 0)
    ///
    /// Returns 0 for invalid IDs.
    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            depth += 1;
            current = self.parent(parent_id);
        }
        depth
    }

    /// Check if a node is an ancestor of another
    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            current = self.parent(parent_id);
        }
        false
    }
}

/// Traversal order for walking the tree node by node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Visit parent, then left subtree, then right subtree
    PreOrder,
    /// Visit left subtree, then parent, then right subtree
    InOrder,
    /// Visit both subtrees before the parent
    PostOrder,
    /// Visit level by level (breadth-first)
    BreadthFirst,
}

/// Extension trait providing plain node-order walks and lookups
///
/// This trait is automatically implemented for all types that implement `Tree`.
pub trait TreeTraversal: Tree {
    /// Walk the tree from the root in the specified order
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.root(), order)
    }

    /// Walk the subtree rooted at a specific node
    fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, Some(start), order)
    }

    /// Labels of all nodes in the specified order
    fn names(&self, order: TraversalOrder) -> Vec<NodeName>
    where
        Self: Sized,
    {
        self.walk(order).filter_map(|id| self.name(id)).collect()
    }

    /// Find a node by its label
    fn find_by_name(&self, name: NodeName) -> Option<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .find(|&id| self.name(id) == Some(name))
    }
}

// Blanket implementation for all Tree types
impl<T: Tree> TreeTraversal for T {}

/// Iterator over node IDs in one of the [`TraversalOrder`]s
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    stack: Vec<NodeId>,
    queue: VecDeque<NodeId>,
    // In-order: next node whose left spine still has to be pushed
    cursor: Option<NodeId>,
    visited: HashSet<NodeId>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    /// Create a new tree walker starting from the given node
    ///
    /// A `None` start yields an empty walk.
    pub fn new(tree: &'a T, start: Option<NodeId>, order: TraversalOrder) -> Self {
        let mut walker = Self {
            tree,
            order,
            stack: Vec::new(),
            queue: VecDeque::new(),
            cursor: None,
            visited: HashSet::new(),
        };

        match order {
            TraversalOrder::PreOrder | TraversalOrder::PostOrder => {
                walker.stack.extend(start);
            }
            TraversalOrder::InOrder => walker.cursor = start,
            TraversalOrder::BreadthFirst => walker.queue.extend(start),
        }

        walker
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::InOrder => self.next_inorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    fn next_preorder(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;

        // Add children in reverse order so they're popped in correct order
        let children: Vec<_> = self.tree.children(current).collect();
        for child in children.into_iter().rev() {
            self.stack.push(child);
        }

        Some(current)
    }

    fn next_inorder(&mut self) -> Option<NodeId> {
        while let Some(current) = self.cursor {
            self.stack.push(current);
            self.cursor = self.tree.left(current);
        }

        let current = self.stack.pop()?;
        self.cursor = self.tree.right(current);
        Some(current)
    }

    fn next_postorder(&mut self) -> Option<NodeId> {
        while let Some(&current) = self.stack.last() {
            if self.visited.contains(&current) {
                self.stack.pop();
                return Some(current);
            }

            self.visited.insert(current);

            // Add children in reverse order
            let children: Vec<_> = self.tree.children(current).collect();
            for child in children.into_iter().rev() {
                self.stack.push(child);
            }
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<NodeId> {
        let current = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(current));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Slot-based test tree, so right-only nodes can be expressed
    struct SlotTree {
        names: Vec<NodeName>,
        parents: Vec<Option<NodeId>>,
        slots: Vec<[Option<NodeId>; 2]>,
    }

    impl SlotTree {
        fn new() -> Self {
            Self {
                names: vec![NodeName(1)],
                parents: vec![None],
                slots: vec![[None, None]],
            }
        }

        fn attach(&mut self, parent: NodeId, side: Side) -> NodeId {
            let id = NodeId::new(self.names.len());
            self.names.push(NodeName(id.get() as u32 + 1));
            self.parents.push(Some(parent));
            self.slots.push([None, None]);
            self.slots[parent.get()][side.index()] = Some(id);
            id
        }
    }

    impl Tree for SlotTree {
        fn root(&self) -> Option<NodeId> {
            Some(NodeId::ROOT)
        }

        fn name(&self, id: NodeId) -> Option<NodeName> {
            self.names.get(id.get()).copied()
        }

        fn parent(&self, id: NodeId) -> Option<NodeId> {
            self.parents.get(id.get()).copied().flatten()
        }

        fn child_slots(&self, id: NodeId) -> [Option<NodeId>; 2] {
            self.slots.get(id.get()).copied().unwrap_or([None, None])
        }

        fn node_count(&self) -> usize {
            self.names.len()
        }
    }

    fn labels(tree: &SlotTree, order: TraversalOrder) -> Vec<u32> {
        tree.names(order).into_iter().map(NodeName::get).collect()
    }

    //       1
    //      / \
    //     2   3
    //      \
    //       4
    fn sample() -> SlotTree {
        let mut tree = SlotTree::new();
        let two = tree.attach(NodeId::ROOT, Side::Left);
        tree.attach(NodeId::ROOT, Side::Right);
        tree.attach(two, Side::Right);
        tree
    }

    #[test]
    fn test_basic_tree_operations() {
        let tree = sample();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.child_count(NodeId::ROOT), 2);
        assert_eq!(tree.child_count(NodeId(1)), 1);
        assert_eq!(tree.left(NodeId(1)), None);
        assert_eq!(tree.right(NodeId(1)), Some(NodeId(3)));
        assert!(tree.is_leaf(NodeId(2)));
        assert_eq!(tree.node_ref(NodeId(3)).map(|n| n.name), Some(NodeName(4)));
    }

    #[test]
    fn test_tree_depth() {
        let tree = sample();
        assert_eq!(tree.depth(NodeId::ROOT), 0);
        assert_eq!(tree.depth(NodeId(1)), 1);
        assert_eq!(tree.depth(NodeId(3)), 2);
        assert!(tree.is_ancestor_of(NodeId::ROOT, NodeId(3)));
        assert!(!tree.is_ancestor_of(NodeId(2), NodeId(3)));
    }

    #[test]
    fn test_tree_traversal_orders() {
        let tree = sample();
        assert_eq!(labels(&tree, TraversalOrder::PreOrder), vec![1, 2, 4, 3]);
        assert_eq!(labels(&tree, TraversalOrder::InOrder), vec![2, 4, 1, 3]);
        assert_eq!(labels(&tree, TraversalOrder::PostOrder), vec![4, 2, 3, 1]);
        assert_eq!(labels(&tree, TraversalOrder::BreadthFirst), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_walk_from_subtree() {
        let tree = sample();
        let nodes: Vec<_> = tree.walk_from(NodeId(1), TraversalOrder::PreOrder).collect();
        assert_eq!(nodes, vec![NodeId(1), NodeId(3)]);
    }

    #[test]
    fn test_find_by_name() {
        let tree = sample();
        assert_eq!(tree.find_by_name(NodeName(4)), Some(NodeId(3)));
        assert_eq!(tree.find_by_name(NodeName(9)), None);
    }
}
