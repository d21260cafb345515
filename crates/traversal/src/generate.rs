//! Traversal step generators.
//!
//! A generator walks a tree and emits four [`StepRecord`]s per node, one per
//! [`Phase`], interleaved with the records of the node's subtrees:
//!
//! | Discipline | Per-node emission order                                    |
//! |------------|------------------------------------------------------------|
//! | preorder   | 0, 1, *left*, 2, *right*, 3                                |
//! | inorder    | 0, *left*, 1, 2, *right*, 3                                |
//! | postorder  | 0, *left*, 1, *right*, 2, 3                                |
//!
//! Each discipline's order is written down once as a six-instruction script
//! that [`StepIter`] executes with an explicit frame stack, so skewed trees
//! of any depth are walked without recursion. Generators only read the
//! tree; what a phase means is decided by the caller through a
//! [`PhaseLabelTable`](crate::phase::PhaseLabelTable).

use std::fmt;

use crate::phase::{DepthFirstOrder, Phase};
use crate::tree::{NodeId, NodeRef, Side, Tree};

/// One emitted step: the node touched and the positional phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepRecord {
    pub node: NodeRef,
    pub phase: Phase,
}

impl StepRecord {
    pub const fn new(node: NodeRef, phase: Phase) -> Self {
        Self { node, phase }
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.node.name, self.phase.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Instr {
    Emit(Phase),
    Descend(Side),
}

use Instr::{Descend, Emit};

type Script = [Instr; 6];

const PREORDER: Script = [
    Emit(Phase::ZERO),
    Emit(Phase::ONE),
    Descend(Side::Left),
    Emit(Phase::TWO),
    Descend(Side::Right),
    Emit(Phase::EXIT),
];

const INORDER: Script = [
    Emit(Phase::ZERO),
    Descend(Side::Left),
    Emit(Phase::ONE),
    Emit(Phase::TWO),
    Descend(Side::Right),
    Emit(Phase::EXIT),
];

const POSTORDER: Script = [
    Emit(Phase::ZERO),
    Descend(Side::Left),
    Emit(Phase::ONE),
    Descend(Side::Right),
    Emit(Phase::TWO),
    Emit(Phase::EXIT),
];

const fn script(order: DepthFirstOrder) -> &'static Script {
    match order {
        DepthFirstOrder::Preorder => &PREORDER,
        DepthFirstOrder::Inorder => &INORDER,
        DepthFirstOrder::Postorder => &POSTORDER,
    }
}

#[derive(Debug)]
struct Frame {
    node: NodeRef,
    // Index of the next script instruction for this node
    cursor: usize,
}

/// Lazy producer of the step sequence for one discipline
///
/// Borrows the tree immutably for its whole lifetime, so the tree cannot be
/// mutated while steps are being produced.
pub struct StepIter<'a, T: Tree + ?Sized> {
    tree: &'a T,
    script: &'static Script,
    frames: Vec<Frame>,
}

impl<'a, T: Tree + ?Sized> StepIter<'a, T> {
    /// Steps for the whole tree; empty if the tree has no root
    pub fn new(tree: &'a T, order: DepthFirstOrder) -> Self {
        Self::from_node(tree, tree.root(), order)
    }

    /// Steps for the subtree rooted at `start`
    pub fn from_node(tree: &'a T, start: Option<NodeId>, order: DepthFirstOrder) -> Self {
        let frames = start
            .and_then(|id| tree.node_ref(id))
            .map(|node| Frame { node, cursor: 0 })
            .into_iter()
            .collect();

        Self {
            tree,
            script: script(order),
            frames,
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for StepIter<'a, T> {
    type Item = StepRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.frames.last_mut()?;
            let Some(&instr) = self.script.get(frame.cursor) else {
                self.frames.pop();
                continue;
            };
            frame.cursor += 1;

            match instr {
                Emit(phase) => return Some(StepRecord::new(frame.node, phase)),
                Descend(side) => {
                    let parent = frame.node.id;
                    let child = self
                        .tree
                        .child(parent, side)
                        .and_then(|id| self.tree.node_ref(id));
                    if let Some(node) = child {
                        self.frames.push(Frame { node, cursor: 0 });
                    }
                }
            }
        }
    }
}

/// Step sequence for `order` over the whole tree
pub fn steps<T: Tree + ?Sized>(tree: &T, order: DepthFirstOrder) -> Vec<StepRecord> {
    StepIter::new(tree, order).collect()
}

/// Preorder steps: 0, 1, left subtree, 2, right subtree, 3
pub fn preorder<T: Tree + ?Sized>(tree: &T) -> Vec<StepRecord> {
    StepIter::new(tree, DepthFirstOrder::Preorder).collect()
}

/// Inorder steps: 0, left subtree, 1, 2, right subtree, 3
pub fn inorder<T: Tree + ?Sized>(tree: &T) -> Vec<StepRecord> {
    StepIter::new(tree, DepthFirstOrder::Inorder).collect()
}

/// Postorder steps: 0, left subtree, 1, right subtree, 2, 3
pub fn postorder<T: Tree + ?Sized>(tree: &T) -> Vec<StepRecord> {
    StepIter::new(tree, DepthFirstOrder::Postorder).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{BinaryTree, NodeName};

    fn pairs(steps: &[StepRecord]) -> Vec<(u32, usize)> {
        steps
            .iter()
            .map(|s| (s.node.name.get(), s.phase.index()))
            .collect()
    }

    #[test]
    fn test_single_root() {
        let tree = BinaryTree::new();
        let expected = vec![(1, 0), (1, 1), (1, 2), (1, 3)];
        assert_eq!(pairs(&preorder(&tree)), expected);
        assert_eq!(pairs(&inorder(&tree)), expected);
        assert_eq!(pairs(&postorder(&tree)), expected);
    }

    #[test]
    fn test_interleaving_with_two_children() {
        let mut tree = BinaryTree::new();
        tree.add_child(NodeId::ROOT).unwrap();
        tree.add_child(NodeId::ROOT).unwrap();

        let leaf = |n| vec![(n, 0), (n, 1), (n, 2), (n, 3)];

        let mut expected = vec![(1, 0), (1, 1)];
        expected.extend(leaf(2));
        expected.push((1, 2));
        expected.extend(leaf(3));
        expected.push((1, 3));
        assert_eq!(pairs(&preorder(&tree)), expected);

        let mut expected = vec![(1, 0)];
        expected.extend(leaf(2));
        expected.extend([(1, 1), (1, 2)]);
        expected.extend(leaf(3));
        expected.push((1, 3));
        assert_eq!(pairs(&inorder(&tree)), expected);

        let mut expected = vec![(1, 0)];
        expected.extend(leaf(2));
        expected.push((1, 1));
        expected.extend(leaf(3));
        expected.extend([(1, 2), (1, 3)]);
        assert_eq!(pairs(&postorder(&tree)), expected);
    }

    #[test]
    fn test_subtree_start() {
        let mut tree = BinaryTree::new();
        let two = tree.add_child(NodeId::ROOT).unwrap();
        tree.add_child(two.id).unwrap();

        let steps: Vec<_> =
            StepIter::from_node(&tree, Some(two.id), DepthFirstOrder::Preorder).collect();
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0].node.name, NodeName(2));
    }

    #[test]
    fn test_missing_start_is_empty() {
        let tree = BinaryTree::new();
        assert_eq!(
            StepIter::from_node(&tree, None, DepthFirstOrder::Inorder).count(),
            0
        );
        assert_eq!(
            StepIter::from_node(&tree, Some(NodeId(42)), DepthFirstOrder::Inorder).count(),
            0
        );
    }

    #[test]
    fn test_step_display() {
        let tree = BinaryTree::new();
        let rendered: Vec<_> = preorder(&tree).iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["(1, 0)", "(1, 1)", "(1, 2)", "(1, 3)"]);
    }
}
