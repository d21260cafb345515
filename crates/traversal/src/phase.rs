//! Phases, their per-traversal meanings and the pseudocode label tables.
//!
//! Every depth-first discipline touches each node in four positional slots,
//! [`Phase`] 0 to 3. What a slot *means* depends on the discipline: the slot
//! at which the node's value is logically visited is 0 for preorder, 1 for
//! inorder and 2 for postorder, while slot 3 always means the node is done.
//! A [`PhaseLabelTable`] carries that mapping so that one playback mechanism
//! can animate all three disciplines.

use anyhow::anyhow;
use derive_more::Display;
use std::fmt;
use std::str::FromStr;

use crate::tree::TraversalOrder;

/// A positional step slot, `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "phase {}", _0)]
pub struct Phase(u8);

impl Phase {
    pub const ZERO: Phase = Phase(0);
    pub const ONE: Phase = Phase(1);
    pub const TWO: Phase = Phase(2);
    /// The node is fully processed, for every discipline
    pub const EXIT: Phase = Phase(3);

    /// All phases in positional order
    pub const ALL: [Phase; 4] = [Phase::ZERO, Phase::ONE, Phase::TWO, Phase::EXIT];

    /// Create a phase from its index
    ///
    /// Returns `None` for indices above 3.
    pub const fn new(index: u8) -> Option<Self> {
        if index <= 3 {
            Some(Phase(index))
        } else {
            None
        }
    }

    /// The positional index, which is also the pseudocode line index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_exit(self) -> bool {
        self.0 == Phase::EXIT.0
    }
}

/// The canonical meaning of a pseudocode line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseMeaning {
    VisitSelf,
    GoLeft,
    GoRight,
    End,
}

impl PhaseMeaning {
    /// The pseudocode text shown for this meaning
    pub const fn label(self) -> &'static str {
        match self {
            PhaseMeaning::VisitSelf => "Visit this node",
            PhaseMeaning::GoLeft => "Visit left node",
            PhaseMeaning::GoRight => "Visit right node",
            PhaseMeaning::End => "End",
        }
    }
}

impl fmt::Display for PhaseMeaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display position (= phase) to meaning, for one discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseLabelTable([PhaseMeaning; 4]);

impl PhaseLabelTable {
    pub const PREORDER: PhaseLabelTable = PhaseLabelTable([
        PhaseMeaning::VisitSelf,
        PhaseMeaning::GoLeft,
        PhaseMeaning::GoRight,
        PhaseMeaning::End,
    ]);

    pub const INORDER: PhaseLabelTable = PhaseLabelTable([
        PhaseMeaning::GoLeft,
        PhaseMeaning::VisitSelf,
        PhaseMeaning::GoRight,
        PhaseMeaning::End,
    ]);

    pub const POSTORDER: PhaseLabelTable = PhaseLabelTable([
        PhaseMeaning::GoLeft,
        PhaseMeaning::GoRight,
        PhaseMeaning::VisitSelf,
        PhaseMeaning::End,
    ]);

    /// Build a custom table
    pub const fn new(meanings: [PhaseMeaning; 4]) -> Self {
        PhaseLabelTable(meanings)
    }

    /// The meaning shown on the line of `phase`
    pub const fn meaning(&self, phase: Phase) -> PhaseMeaning {
        self.0[phase.index()]
    }

    /// The pseudocode text shown on the line of `phase`
    pub const fn label(&self, phase: Phase) -> &'static str {
        self.meaning(phase).label()
    }

    /// All lines in display order
    pub fn lines(&self) -> impl Iterator<Item = (Phase, &'static str)> + '_ {
        Phase::ALL.into_iter().map(move |phase| (phase, self.label(phase)))
    }

    /// The phase whose line reads "Visit this node"
    pub fn visit_phase(&self) -> Option<Phase> {
        Phase::ALL
            .into_iter()
            .find(|&phase| self.meaning(phase) == PhaseMeaning::VisitSelf)
    }
}

/// The three step-generating disciplines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DepthFirstOrder {
    #[display(fmt = "preorder")]
    Preorder,
    #[display(fmt = "inorder")]
    Inorder,
    #[display(fmt = "postorder")]
    Postorder,
}

impl DepthFirstOrder {
    pub const ALL: [DepthFirstOrder; 3] = [
        DepthFirstOrder::Preorder,
        DepthFirstOrder::Inorder,
        DepthFirstOrder::Postorder,
    ];

    /// The phase at which a node's value is logically visited
    pub const fn visit_phase(self) -> Phase {
        match self {
            DepthFirstOrder::Preorder => Phase::ZERO,
            DepthFirstOrder::Inorder => Phase::ONE,
            DepthFirstOrder::Postorder => Phase::TWO,
        }
    }

    /// The pseudocode table shown while animating this discipline
    pub const fn label_table(self) -> PhaseLabelTable {
        match self {
            DepthFirstOrder::Preorder => PhaseLabelTable::PREORDER,
            DepthFirstOrder::Inorder => PhaseLabelTable::INORDER,
            DepthFirstOrder::Postorder => PhaseLabelTable::POSTORDER,
        }
    }

    /// The plain node order this discipline visits in
    pub const fn node_order(self) -> TraversalOrder {
        match self {
            DepthFirstOrder::Preorder => TraversalOrder::PreOrder,
            DepthFirstOrder::Inorder => TraversalOrder::InOrder,
            DepthFirstOrder::Postorder => TraversalOrder::PostOrder,
        }
    }
}

impl FromStr for DepthFirstOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre" | "preorder" => Ok(DepthFirstOrder::Preorder),
            "in" | "inorder" => Ok(DepthFirstOrder::Inorder),
            "post" | "postorder" => Ok(DepthFirstOrder::Postorder),
            other => Err(anyhow!("unknown depth-first order: {other:?}")),
        }
    }
}
