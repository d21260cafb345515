//! Traversal Library
//!
//! Step generation and timed playback for animated binary tree traversals.
//! A learner grows a binary tree one child at a time, then watches a
//! preorder, inorder, postorder or breadth-first traversal highlight nodes
//! and pseudocode lines in sequence.
//!
//! # Core Concepts
//!
//! - **BinaryTree**: arena tree with at most two children per node
//! - **Phase**: one of four positional steps a traversal takes at each node
//! - **PhaseLabelTable**: which pseudocode line each phase stands for
//! - **Generators**: [`generate::preorder`], [`generate::inorder`] and
//!   [`generate::postorder`] turn a tree into an ordered step sequence
//! - **Player**: replays a step sequence against a [`TraversalCanvas`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use traversal::prelude::*;
//!
//! let mut tree = BinaryTree::new();
//! let two = tree.add_child(NodeId::ROOT).expect("root has room");
//! tree.add_child(two.id).expect("node 2 has room");
//!
//! let canvas = Arc::new(RecordingCanvas::new());
//! let mut player = Player::new(canvas.clone(), PlaybackOptions::default());
//!
//! // Returns immediately; one action every 500ms in the background
//! let run = player.play_depth_first(&tree, DepthFirstOrder::Inorder)?;
//! run.wait()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod generate;
pub mod phase;
pub mod playback;
pub mod tree;

pub use playback::TraversalCanvas;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::generate::{StepIter, StepRecord};
    pub use crate::phase::{DepthFirstOrder, Phase, PhaseLabelTable, PhaseMeaning};
    pub use crate::playback::{
        CanvasAction, NodeColor, OverlapPolicy, PlaybackHandle, PlaybackOptions,
        PlaybackOutcome, Player, RecordingCanvas, Timeline, TraversalCanvas,
    };
    pub use crate::tree::prelude::*;
}
