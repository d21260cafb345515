//! Configuration options for traversal playback.
//!
//! This module provides the `PlaybackOptions` struct which controls step
//! timing, flash duration, what happens to pending runs when a new one
//! starts, and the colour names a canvas should use.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::NodeColor;

/// What starting a new run does to runs that are still pending
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OverlapPolicy {
    /// Leave earlier runs alone; their highlights interleave with the new run
    #[default]
    Overlap,
    /// Cancel every pending run before starting the new one
    CancelPrevious,
}

/// Colour names a canvas paints with, per [`NodeColor`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    pub idle: String,
    pub active: String,
    pub visited: String,
    pub done: String,
    pub discovered: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            idle: "skyblue".into(),
            active: "orange".into(),
            visited: "green".into(),
            done: "darkgrey".into(),
            discovered: "orange".into(),
        }
    }
}

impl Palette {
    /// The colour name for a semantic colour
    pub fn name(&self, color: NodeColor) -> &str {
        match color {
            NodeColor::Idle => &self.idle,
            NodeColor::Active => &self.active,
            NodeColor::Visited => &self.visited,
            NodeColor::Done => &self.done,
            NodeColor::Discovered => &self.discovered,
        }
    }
}

/// Configuration options for traversal playback.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaybackOptions {
    /// Delay between consecutive depth-first steps, in milliseconds.
    pub step_delay_ms: u64,

    /// Delay between consecutive breadth-first highlights, in milliseconds.
    pub bfs_delay_ms: u64,

    /// How long a flash highlight lasts before reverting, in milliseconds.
    pub flash_ms: u64,

    /// Policy for runs still pending when a new run starts.
    pub overlap: OverlapPolicy,

    /// Colour names for the canvas.
    pub palette: Palette,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            step_delay_ms: 500,
            bfs_delay_ms: 1000,
            flash_ms: 500,
            overlap: OverlapPolicy::default(),
            palette: Palette::default(),
        }
    }
}

impl PlaybackOptions {
    /// Create new playback options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth-first step delay.
    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.step_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the breadth-first delay.
    pub fn bfs_delay(mut self, delay: Duration) -> Self {
        self.bfs_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the flash duration.
    pub fn flash(mut self, duration: Duration) -> Self {
        self.flash_ms = duration.as_millis() as u64;
        self
    }

    /// Set the overlap policy.
    pub fn overlap(mut self, policy: OverlapPolicy) -> Self {
        self.overlap = policy;
        self
    }

    /// Set the palette.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// The depth-first step delay.
    pub fn step_delay_duration(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// The breadth-first delay.
    pub fn bfs_delay_duration(&self) -> Duration {
        Duration::from_millis(self.bfs_delay_ms)
    }

    /// The flash duration.
    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_canonical_timing() {
        let options = PlaybackOptions::new();
        assert_eq!(options.step_delay_duration(), Duration::from_millis(500));
        assert_eq!(options.bfs_delay_duration(), Duration::from_secs(1));
        assert_eq!(options.flash_duration(), Duration::from_millis(500));
        assert_eq!(options.overlap, OverlapPolicy::Overlap);
    }

    #[test]
    fn test_builder() {
        let options = PlaybackOptions::new()
            .step_delay(Duration::from_millis(20))
            .bfs_delay(Duration::from_millis(40))
            .flash(Duration::from_millis(10))
            .overlap(OverlapPolicy::CancelPrevious);

        assert_eq!(options.step_delay_ms, 20);
        assert_eq!(options.bfs_delay_ms, 40);
        assert_eq!(options.flash_ms, 10);
        assert_eq!(options.overlap, OverlapPolicy::CancelPrevious);
    }

    #[test]
    fn test_palette_names() {
        let palette = Palette::default();
        assert_eq!(palette.name(NodeColor::Idle), "skyblue");
        assert_eq!(palette.name(NodeColor::Done), "darkgrey");
        assert_eq!(palette.name(NodeColor::Visited), "green");
        assert_ne!(
            palette.name(NodeColor::Visited),
            palette.name(NodeColor::Discovered)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_overlap_policy_tokens() {
        use serde_test::{assert_tokens, Token};

        assert_tokens(
            &OverlapPolicy::CancelPrevious,
            &[Token::UnitVariant {
                name: "OverlapPolicy",
                variant: "cancel-previous",
            }],
        );
    }
}
