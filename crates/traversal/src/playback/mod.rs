//! Playback scheduler
//!
//! Turns step sequences (or a live breadth-first exploration) into a
//! [`Timeline`] of canvas actions and plays it with fixed per-step delays.
//!
//! # Core Concepts
//!
//! - **TraversalCanvas**: the two display calls the scheduler makes
//! - **Timeline**: the precomputed, absolutely-timed schedule of one run
//! - **Player**: runs timelines in the background and hands out cancellable handles
//! - **PlaybackOptions**: delays, flash duration, overlap policy and palette

mod canvas;
mod options;
mod player;
mod timeline;

pub use canvas::{CanvasAction, NodeColor, RecordingCanvas, TraversalCanvas};
pub use options::{OverlapPolicy, Palette, PlaybackOptions};
pub use player::{PlaybackHandle, PlaybackOutcome, Player, RunId};
pub use timeline::{ScheduledAction, Timeline};
