//! Text canvas: keeps per-node visual state and logs every change

use log::warn;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use traversal::phase::{Phase, PhaseLabelTable};
use traversal::playback::{NodeColor, Palette, TraversalCanvas};
use traversal::tree::{NodeId, NodeRef};

/// What a node currently looks like
#[derive(Debug, Default)]
struct CanvasState {
    colors: HashMap<NodeId, NodeColor>,
    active_lines: HashMap<NodeId, Phase>,
    pseudocode: Option<PhaseLabelTable>,
}

/// A [`TraversalCanvas`] that writes one line per highlight
///
/// The colour and the active pseudocode line of every node are remembered so
/// the tree can be re-rendered with its highlights at any time.
pub struct TerminalCanvas {
    palette: Palette,
    started: Instant,
    out: Mutex<Box<dyn Write + Send>>,
    state: Mutex<CanvasState>,
}

impl TerminalCanvas {
    pub fn new(palette: Palette, out: Box<dyn Write + Send>) -> Self {
        Self {
            palette,
            started: Instant::now(),
            out: Mutex::new(out),
            state: Mutex::new(CanvasState::default()),
        }
    }

    /// A canvas printing to standard output
    pub fn stdout(palette: Palette) -> Self {
        Self::new(palette, Box::new(std::io::stdout()))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn state(&self) -> MutexGuard<'_, CanvasState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write a line of text
    pub fn print(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    /// Attach pseudocode lines to every node; no line is active yet
    pub fn show_pseudocode(&self, table: PhaseLabelTable) {
        {
            let mut state = self.state();
            state.pseudocode = Some(table);
            state.active_lines.clear();
        }

        let lines: Vec<String> = table
            .lines()
            .map(|(phase, label)| format!("  {}: {}", phase.index(), label))
            .collect();
        self.print(&format!("pseudocode:\n{}", lines.join("\n")));
    }

    /// Drop all highlights and pseudocode
    pub fn reset(&self) {
        let mut state = self.state();
        state.colors.clear();
        state.active_lines.clear();
        state.pseudocode = None;
    }

    /// Current colour of a node, idle if it was never painted
    pub fn color_of(&self, id: NodeId) -> NodeColor {
        self.state()
            .colors
            .get(&id)
            .copied()
            .unwrap_or(NodeColor::Idle)
    }

    /// Text of the active pseudocode line of a node, if any
    pub fn active_label(&self, id: NodeId) -> Option<&'static str> {
        let state = self.state();
        let table = state.pseudocode?;
        state.active_lines.get(&id).map(|&phase| table.label(phase))
    }

    fn stamp(&self) -> String {
        format!("[{:>8.3}s]", self.started.elapsed().as_secs_f64())
    }
}

impl TraversalCanvas for TerminalCanvas {
    fn highlight_node(&self, node: NodeRef, flash: bool, color: NodeColor) {
        self.state().colors.insert(node.id, color);

        let suffix = if flash { " (flash)" } else { "" };
        self.print(&format!(
            "{} node {:>3} -> {}{}",
            self.stamp(),
            node.name.get(),
            self.palette.name(color),
            suffix
        ));
    }

    fn highlight_phase(&self, node: NodeRef, phase: Phase) {
        let label = {
            let mut state = self.state();
            state.active_lines.insert(node.id, phase);
            state.pseudocode.map(|table| table.label(phase))
        };

        self.print(&format!(
            "{} node {:>3} |  {}: {}",
            self.stamp(),
            node.name.get(),
            phase.index(),
            label.unwrap_or("-")
        ));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;
    use traversal::tree::NodeName;

    /// A writer whose contents can be read back
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn buffered_canvas() -> (TerminalCanvas, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let canvas = TerminalCanvas::new(Palette::default(), Box::new(buffer.clone()));
        (canvas, buffer)
    }

    #[test]
    fn test_highlights_update_state() {
        let (canvas, buffer) = buffered_canvas();
        let node = NodeRef::new(NodeId(0), NodeName(1));

        canvas.show_pseudocode(PhaseLabelTable::PREORDER);
        canvas.highlight_node(node, false, NodeColor::Active);
        canvas.highlight_phase(node, Phase::ONE);

        assert_eq!(canvas.color_of(node.id), NodeColor::Active);
        assert_eq!(canvas.active_label(node.id), Some("Visit left node"));

        let text = buffer.contents();
        assert!(text.contains("0: Visit this node"));
        assert!(text.contains("node   1 -> orange"));
        assert!(text.contains("node   1 |  1: Visit left node"));
    }

    #[test]
    fn test_reset_clears_highlights() {
        let (canvas, _) = buffered_canvas();
        let node = NodeRef::new(NodeId(2), NodeName(3));

        canvas.show_pseudocode(PhaseLabelTable::POSTORDER);
        canvas.highlight_node(node, true, NodeColor::Discovered);
        canvas.highlight_phase(node, Phase::EXIT);
        canvas.reset();

        assert_eq!(canvas.color_of(node.id), NodeColor::Idle);
        assert_eq!(canvas.active_label(node.id), None);
    }
}
