//! Timed, cancellable execution of timelines.
//!
//! Every run gets its own background thread. The thread waits for each
//! action's absolute deadline (`start + offset`) on the run's cancellation
//! channel, so a cancel request wakes it immediately while an untouched run
//! simply times out into the next action.

use anyhow::{anyhow, Context, Result};
use flume::{Receiver, RecvTimeoutError, Sender};
use log::{debug, info};
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use super::{OverlapPolicy, PlaybackOptions, Timeline, TraversalCanvas};
use crate::generate;
use crate::phase::DepthFirstOrder;
use crate::tree::Tree;

/// Identifies one run of a [`Player`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every scheduled action was issued
    Completed { fired: usize },
    /// The run was cancelled with `pending` actions left
    Cancelled { fired: usize, pending: usize },
}

impl PlaybackOutcome {
    /// Number of actions issued before the run ended
    pub fn fired(&self) -> usize {
        match *self {
            PlaybackOutcome::Completed { fired } | PlaybackOutcome::Cancelled { fired, .. } => {
                fired
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PlaybackOutcome::Cancelled { .. })
    }
}

/// Handle to a run in flight
///
/// Dropping the handle does not stop the run.
#[derive(Debug)]
pub struct PlaybackHandle {
    id: RunId,
    cancel: Sender<()>,
    thread: Option<JoinHandle<PlaybackOutcome>>,
}

impl PlaybackHandle {
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Ask the run to stop before its next pending action
    pub fn cancel(&self) {
        // A full channel means a cancel is already queued
        let _ = self.cancel.try_send(());
    }

    /// True once the run has issued its last action or been cancelled
    pub fn is_finished(&self) -> bool {
        self.thread
            .as_ref()
            .map_or(true, |thread| thread.is_finished())
    }

    /// Block until the run ends
    pub fn wait(mut self) -> Result<PlaybackOutcome> {
        let thread = self
            .thread
            .take()
            .ok_or_else(|| anyhow!("{} was already joined", self.id))?;
        thread
            .join()
            .map_err(|_| anyhow!("{} panicked while playing", self.id))
    }
}

/// Plays timelines against a shared canvas
///
/// Runs never wait on each other. What happens to pending runs when a new
/// one starts is decided by [`PlaybackOptions::overlap`].
pub struct Player<C: TraversalCanvas + 'static> {
    canvas: Arc<C>,
    options: PlaybackOptions,
    next_run: u64,
    // Cancellation senders of runs that may still be pending
    runs: Vec<(RunId, Sender<()>)>,
}

impl<C: TraversalCanvas + 'static> Player<C> {
    pub fn new(canvas: Arc<C>, options: PlaybackOptions) -> Self {
        Self {
            canvas,
            options,
            next_run: 1,
            runs: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Arc<C> {
        &self.canvas
    }

    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PlaybackOptions) {
        self.options = options;
    }

    /// Start playing a timeline; returns as soon as the run is spawned
    ///
    /// Offsets are measured from the moment this is called.
    pub fn play(&mut self, timeline: Timeline) -> Result<PlaybackHandle> {
        let start = Instant::now();

        if self.options.overlap == OverlapPolicy::CancelPrevious {
            self.cancel_all();
        }
        self.prune();

        let id = RunId(self.next_run);
        self.next_run += 1;

        let (cancel_tx, cancel_rx) = flume::bounded(1);
        let canvas = Arc::clone(&self.canvas);

        info!(
            "Starting {} with {} actions over {:?}",
            id,
            timeline.len(),
            timeline.duration()
        );

        let thread = std::thread::Builder::new()
            .name(format!("traversal-{id}"))
            .spawn(move || run(id, timeline, canvas.as_ref(), &cancel_rx, start))
            .with_context(|| format!("Failed to spawn playback thread for {id}"))?;

        self.runs.push((id, cancel_tx.clone()));

        Ok(PlaybackHandle {
            id,
            cancel: cancel_tx,
            thread: Some(thread),
        })
    }

    /// Generate and play the steps of a depth-first discipline
    pub fn play_depth_first<T: Tree + ?Sized>(
        &mut self,
        tree: &T,
        order: DepthFirstOrder,
    ) -> Result<PlaybackHandle> {
        let steps = generate::steps(tree, order);
        debug!("Generated {} {} steps", steps.len(), order);
        let timeline = Timeline::depth_first(&steps, order, self.options.step_delay_duration());
        self.play(timeline)
    }

    /// Explore the tree level by level and play the resulting schedule
    pub fn play_breadth_first<T: Tree + ?Sized>(&mut self, tree: &T) -> Result<PlaybackHandle> {
        let timeline = Timeline::breadth_first(
            tree,
            self.options.bfs_delay_duration(),
            self.options.flash_duration(),
        );
        self.play(timeline)
    }

    /// Cancel every run that may still be pending
    ///
    /// Returns how many runs were signalled.
    pub fn cancel_all(&mut self) -> usize {
        self.prune();
        let count = self.runs.len();
        for (id, cancel) in self.runs.drain(..) {
            debug!("Cancelling {}", id);
            let _ = cancel.try_send(());
        }
        count
    }

    /// Number of runs that may still be pending
    pub fn active_runs(&mut self) -> usize {
        self.prune();
        self.runs.len()
    }

    // A run drops its receiver when it ends, disconnecting the sender
    fn prune(&mut self) {
        self.runs.retain(|(_, cancel)| !cancel.is_disconnected());
    }
}

fn run<C: TraversalCanvas + ?Sized>(
    id: RunId,
    timeline: Timeline,
    canvas: &C,
    cancel: &Receiver<()>,
    start: Instant,
) -> PlaybackOutcome {
    let total = timeline.len();

    for (fired, scheduled) in timeline.into_iter().enumerate() {
        let deadline = start + scheduled.at;

        match cancel.recv_deadline(deadline) {
            Ok(()) => {
                info!("{} cancelled after {} of {} actions", id, fired, total);
                return PlaybackOutcome::Cancelled {
                    fired,
                    pending: total - fired,
                };
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody can cancel anymore; keep the schedule anyway
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
            }
        }

        debug!("{} +{:?}: {:?}", id, scheduled.at, scheduled.action);
        scheduled.action.apply(canvas);
    }

    info!("{} completed ({} actions)", id, total);
    PlaybackOutcome::Completed { fired: total }
}
