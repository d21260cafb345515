//! The display capability the scheduler drives.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::phase::Phase;
use crate::tree::NodeRef;

/// Semantic fill colour of a node
///
/// Concrete colour names come from a [`Palette`](super::Palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeColor {
    /// Resting colour; flashes revert to it
    Idle,
    /// Depth-first: node is being visited
    Active,
    /// Breadth-first: node was dequeued and visited
    Visited,
    /// Node is fully processed
    Done,
    /// Breadth-first: node was just discovered and queued
    Discovered,
}

/// A surface that can show traversal progress
///
/// Both calls are fire-and-forget. They are issued from playback threads,
/// so implementations own whatever interior mutability they need.
pub trait TraversalCanvas: Send + Sync {
    /// Paint `node` with `color`
    ///
    /// `flash` marks a transient highlight; the scheduler itself issues the
    /// follow-up call that reverts the node to [`NodeColor::Idle`].
    fn highlight_node(&self, node: NodeRef, flash: bool, color: NodeColor);

    /// Mark the pseudocode line of `phase` active on `node`, all others inactive
    fn highlight_phase(&self, node: NodeRef, phase: Phase);
}

/// One canvas call, as stored in a [`Timeline`](super::Timeline)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasAction {
    HighlightNode {
        node: NodeRef,
        flash: bool,
        color: NodeColor,
    },
    HighlightPhase {
        node: NodeRef,
        phase: Phase,
    },
}

impl CanvasAction {
    /// The node this action targets
    pub fn node(&self) -> NodeRef {
        match *self {
            CanvasAction::HighlightNode { node, .. }
            | CanvasAction::HighlightPhase { node, .. } => node,
        }
    }

    /// The colour painted, if this is a node highlight
    pub fn color(&self) -> Option<NodeColor> {
        match *self {
            CanvasAction::HighlightNode { color, .. } => Some(color),
            CanvasAction::HighlightPhase { .. } => None,
        }
    }

    /// Issue this action against a canvas
    pub fn apply<C: TraversalCanvas + ?Sized>(&self, canvas: &C) {
        match *self {
            CanvasAction::HighlightNode { node, flash, color } => {
                canvas.highlight_node(node, flash, color)
            }
            CanvasAction::HighlightPhase { node, phase } => canvas.highlight_phase(node, phase),
        }
    }
}

/// A canvas that only remembers what it was asked to do
///
/// Useful for headless runs and tests. Each call is stored together with the
/// time elapsed since the canvas was created.
#[derive(Debug)]
pub struct RecordingCanvas {
    created: Instant,
    events: Mutex<Vec<(Duration, CanvasAction)>>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            created: Instant::now(),
            events: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, action: CanvasAction) {
        let elapsed = self.created.elapsed();
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((elapsed, action));
    }

    /// All recorded actions in call order
    pub fn actions(&self) -> Vec<CanvasAction> {
        self.timed_actions().into_iter().map(|(_, a)| a).collect()
    }

    /// All recorded actions with their elapsed time
    pub fn timed_actions(&self) -> Vec<(Duration, CanvasAction)> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl TraversalCanvas for RecordingCanvas {
    fn highlight_node(&self, node: NodeRef, flash: bool, color: NodeColor) {
        self.record(CanvasAction::HighlightNode { node, flash, color });
    }

    fn highlight_phase(&self, node: NodeRef, phase: Phase) {
        self.record(CanvasAction::HighlightPhase { node, phase });
    }
}
