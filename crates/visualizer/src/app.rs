use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use traversal::playback::{PlaybackOptions, Player};
use traversal::tree::{BinaryTree, NodeName, TreeError, TreeSnapshot};

use crate::canvas::TerminalCanvas;
use crate::menu::{Command, HELP};
use crate::ui;

/// Whether the input loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the tree and plays traversals of its latest snapshot
pub struct VisualizerApp {
    tree: BinaryTree,
    snapshot: TreeSnapshot,
    canvas: Arc<TerminalCanvas>,
    player: Player<TerminalCanvas>,
    rng: StdRng,
}

impl VisualizerApp {
    pub fn new(canvas: Arc<TerminalCanvas>, options: PlaybackOptions) -> Self {
        let tree = BinaryTree::new();
        Self {
            snapshot: tree.snapshot(),
            tree,
            player: Player::new(Arc::clone(&canvas), options),
            canvas,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for `random`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn snapshot(&self) -> &TreeSnapshot {
        &self.snapshot
    }

    pub fn canvas(&self) -> &Arc<TerminalCanvas> {
        &self.canvas
    }

    pub fn handle(&mut self, command: Command) -> Result<Flow> {
        debug!("Handling {:?}", command);

        match command {
            Command::Add(name) => self.add(name),
            Command::Random(count) => {
                let added = self.grow_randomly(count)?;
                self.canvas.print(&format!("Added {added} random node(s)"));
            }
            Command::Traverse(order) => {
                self.canvas.show_pseudocode(order.label_table());
                let run = self.player.play_depth_first(self.snapshot.as_ref(), order)?;
                self.canvas.print(&format!("{} started ({order})", run.id()));
            }
            Command::BreadthFirst => {
                let run = self.player.play_breadth_first(self.snapshot.as_ref())?;
                self.canvas.print(&format!("{} started (bfs)", run.id()));
            }
            Command::Reset => {
                self.canvas.reset();
                self.show();
            }
            Command::Cancel => {
                let cancelled = self.player.cancel_all();
                self.canvas
                    .print(&format!("Cancelled {cancelled} pending traversal(s)"));
            }
            Command::Show => self.show(),
            Command::Help => self.canvas.print(HELP),
            Command::Quit => {
                self.player.cancel_all();
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    fn add(&mut self, name: NodeName) {
        match self.tree.add_child_to(name) {
            Ok(node) => {
                self.canvas.print(&format!("Added node {node} under {name}"));
                self.refresh();
            }
            Err(TreeError::CapacityExceeded { .. }) => {
                self.canvas.print("A node can have at most 2 children.");
            }
            Err(e) => self.canvas.print(&e.to_string()),
        }
    }

    /// Attach `count` children, each under a uniformly picked node with a
    /// free slot; returns how many were added
    fn grow_randomly(&mut self, count: usize) -> Result<usize> {
        let mut open = self.tree.open_nodes();
        let mut added = 0;

        while added < count && !open.is_empty() {
            let pick = self.rng.gen_range(0..open.len());
            let target = open[pick];
            let child = self.tree.add_child(target)?;
            added += 1;

            if self.tree.get(target).map_or(true, |node| node.is_full()) {
                open.swap_remove(pick);
            }
            open.push(child.id);
        }

        info!("Grew {} of {} requested random nodes", added, count);
        self.refresh();
        Ok(added)
    }

    // A mutation replaces the snapshot and redraws without highlights
    fn refresh(&mut self) {
        self.snapshot = self.tree.snapshot();
        self.canvas.reset();
        self.show();
    }

    fn show(&self) {
        self.canvas.print(&ui::render_tree(&self.snapshot, &self.canvas));
    }
}
