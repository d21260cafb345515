//! Pure schedule computation.
//!
//! A [`Timeline`] is the full list of canvas actions of one run, each with
//! its offset from the moment the run was started. Offsets are absolute, so
//! a slow canvas call delays nothing that comes after it.

use log::trace;
use std::collections::VecDeque;
use std::time::Duration;

use super::{CanvasAction, NodeColor};
use crate::generate::StepRecord;
use crate::phase::DepthFirstOrder;
use crate::tree::{NodeId, Tree};

/// A canvas action and when to issue it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    /// Offset from the start of the run
    pub at: Duration,
    pub action: CanvasAction,
}

/// The ordered schedule of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    actions: Vec<ScheduledAction>,
}

fn offset(delay: Duration, index: usize) -> Duration {
    delay.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

impl Timeline {
    /// Schedule for replaying depth-first steps, one step every `step_delay`
    ///
    /// Step `i` fires at `i * step_delay`. Every step highlights its phase
    /// line; the visit phase of `order` additionally paints the node
    /// [`NodeColor::Active`] and the exit phase paints it [`NodeColor::Done`].
    /// The node highlight is issued before the phase highlight.
    pub fn depth_first(
        steps: &[StepRecord],
        order: DepthFirstOrder,
        step_delay: Duration,
    ) -> Self {
        let visit = order.visit_phase();
        let mut actions = Vec::with_capacity(steps.len() * 2);

        for (index, step) in steps.iter().enumerate() {
            let at = offset(step_delay, index);

            let color = if step.phase == visit {
                Some(NodeColor::Active)
            } else if step.phase.is_exit() {
                Some(NodeColor::Done)
            } else {
                None
            };

            if let Some(color) = color {
                actions.push(ScheduledAction {
                    at,
                    action: CanvasAction::HighlightNode {
                        node: step.node,
                        flash: false,
                        color,
                    },
                });
            }

            actions.push(ScheduledAction {
                at,
                action: CanvasAction::HighlightPhase {
                    node: step.node,
                    phase: step.phase,
                },
            });
        }

        Self { actions }
    }

    /// Schedule for a level-by-level exploration starting at the root
    ///
    /// Each dequeued node is painted [`NodeColor::Visited`] at the current
    /// delay, after which the delay advances by `level_delay`. Each of its
    /// children is then queued and flashed [`NodeColor::Discovered`] at the
    /// current delay, reverting to [`NodeColor::Idle`] `flash` later, and the
    /// delay advances again.
    pub fn breadth_first<T: Tree + ?Sized>(
        tree: &T,
        level_delay: Duration,
        flash: Duration,
    ) -> Self {
        let mut actions = Vec::new();
        let mut queue: VecDeque<NodeId> = tree.root().into_iter().collect();
        let mut delay = Duration::ZERO;

        while let Some(parent) = queue.pop_front() {
            let Some(node) = tree.node_ref(parent) else {
                continue;
            };

            actions.push(ScheduledAction {
                at: delay,
                action: CanvasAction::HighlightNode {
                    node,
                    flash: false,
                    color: NodeColor::Visited,
                },
            });
            delay += level_delay;

            for child in tree.children(parent) {
                queue.push_back(child);

                if let Some(child) = tree.node_ref(child) {
                    actions.push(ScheduledAction {
                        at: delay,
                        action: CanvasAction::HighlightNode {
                            node: child,
                            flash: true,
                            color: NodeColor::Discovered,
                        },
                    });
                    actions.push(ScheduledAction {
                        at: delay + flash,
                        action: CanvasAction::HighlightNode {
                            node: child,
                            flash: false,
                            color: NodeColor::Idle,
                        },
                    });
                }
                delay += level_delay;
            }

            trace!(
                "bfs dequeued {}, queue: {:?}",
                node,
                queue
                    .iter()
                    .filter_map(|&id| tree.name(id))
                    .map(|name| name.get())
                    .collect::<Vec<_>>()
            );
        }

        // Flash reverts were appended out of time order
        actions.sort_by_key(|scheduled| scheduled.at);
        Self { actions }
    }

    pub fn actions(&self) -> &[ScheduledAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Offset of the last action, zero for an empty timeline
    pub fn duration(&self) -> Duration {
        self.actions.last().map(|s| s.at).unwrap_or_default()
    }
}

impl IntoIterator for Timeline {
    type Item = ScheduledAction;
    type IntoIter = std::vec::IntoIter<ScheduledAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;
    use crate::phase::Phase;
    use crate::tree::{BinaryTree, NodeName};

    const STEP: Duration = Duration::from_millis(500);

    #[test]
    fn test_depth_first_offsets() {
        let mut tree = BinaryTree::new();
        tree.add_child(NodeId::ROOT).unwrap();
        let steps = generate::preorder(&tree);
        let timeline = Timeline::depth_first(&steps, DepthFirstOrder::Preorder, STEP);

        let phase_times: Vec<_> = timeline
            .actions()
            .iter()
            .filter(|s| matches!(s.action, CanvasAction::HighlightPhase { .. }))
            .map(|s| s.at.as_millis())
            .collect();
        assert_eq!(phase_times, (0..8).map(|i| i * 500).collect::<Vec<_>>());
        assert_eq!(timeline.duration(), Duration::from_millis(3500));
    }

    #[test]
    fn test_depth_first_colors_follow_visit_phase() {
        let tree = BinaryTree::new();

        for order in DepthFirstOrder::ALL {
            let steps = generate::steps(&tree, order);
            let timeline = Timeline::depth_first(&steps, order, STEP);
            let painted: Vec<_> = timeline
                .actions()
                .iter()
                .filter_map(|s| s.action.color().map(|c| (s.at, c)))
                .collect();

            let visit_at = STEP * order.visit_phase().index() as u32;
            assert_eq!(
                painted,
                vec![
                    (visit_at, NodeColor::Active),
                    (STEP * 3, NodeColor::Done)
                ],
                "{order}"
            );
        }
    }

    #[test]
    fn test_node_highlight_precedes_phase_highlight() {
        let tree = BinaryTree::new();
        let steps = generate::inorder(&tree);
        let timeline = Timeline::depth_first(&steps, DepthFirstOrder::Inorder, STEP);

        let at_visit: Vec<_> = timeline
            .actions()
            .iter()
            .filter(|s| s.at == STEP)
            .map(|s| s.action)
            .collect();
        let node = at_visit[0].node();
        assert_eq!(
            at_visit,
            vec![
                CanvasAction::HighlightNode {
                    node,
                    flash: false,
                    color: NodeColor::Active
                },
                CanvasAction::HighlightPhase {
                    node,
                    phase: Phase::ONE
                },
            ]
        );
    }

    #[test]
    fn test_breadth_first_root_only() {
        let tree = BinaryTree::new();
        let timeline = Timeline::breadth_first(&tree, Duration::from_secs(1), STEP);

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.actions()[0].at, Duration::ZERO);
        assert_eq!(timeline.actions()[0].action.color(), Some(NodeColor::Visited));
        assert_eq!(timeline.actions()[0].action.node().name, NodeName(1));
    }

    #[test]
    fn test_breadth_first_flash_reverts() {
        let mut tree = BinaryTree::new();
        tree.add_child(NodeId::ROOT).unwrap();
        let timeline = Timeline::breadth_first(&tree, Duration::from_secs(1), STEP);

        let summary: Vec<_> = timeline
            .actions()
            .iter()
            .map(|s| match s.action {
                CanvasAction::HighlightNode { node, flash, color } => {
                    (s.at.as_millis(), node.name.get(), flash, color)
                }
                CanvasAction::HighlightPhase { .. } => unreachable!(),
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                (0, 1, false, NodeColor::Visited),
                (1000, 2, true, NodeColor::Discovered),
                (1500, 2, false, NodeColor::Idle),
                (2000, 2, false, NodeColor::Visited),
            ]
        );
    }

    #[test]
    fn test_empty_steps_give_empty_timeline() {
        let timeline = Timeline::depth_first(&[], DepthFirstOrder::Postorder, STEP);
        assert!(timeline.is_empty());
        assert_eq!(timeline.duration(), Duration::ZERO);
    }
}
