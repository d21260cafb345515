//! Plain-text rendering of the tree

use traversal::tree::{BinaryTree, NodeId, Side, TraversalOrder, Tree, TreeTraversal};

use crate::canvas::TerminalCanvas;

fn slot(tree: &BinaryTree, id: NodeId) -> &'static str {
    match tree.parent(id) {
        None => "*",
        Some(parent) if tree.child(parent, Side::Left) == Some(id) => "L",
        Some(_) => "R",
    }
}

/// One line per node in preorder, indented by depth, with its colour and
/// active pseudocode line
pub fn render_tree(tree: &BinaryTree, canvas: &TerminalCanvas) -> String {
    let mut lines = Vec::with_capacity(tree.node_count() + 1);

    for id in tree.walk(TraversalOrder::PreOrder) {
        let Some(name) = tree.name(id) else {
            continue;
        };
        let indent = "  ".repeat(tree.depth(id));
        let color = canvas.palette().name(canvas.color_of(id));

        let mut line = format!("{indent}{} {name} [{color}]", slot(tree, id));
        if let Some(label) = canvas.active_label(id) {
            line.push_str(&format!("  > {label}"));
        }
        lines.push(line);
    }

    let open = tree.open_nodes().len();
    lines.push(format!(
        "{} nodes, {} with a free slot, next label {}",
        tree.node_count(),
        open,
        tree.next_name()
    ));
    lines.join("\n")
}
