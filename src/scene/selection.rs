//! Selection visuals for model nodes.
//!
//! Selecting a placement marks its model node as the target of transform gestures. How
//! (or whether) that is shown is up to a [`SelectionVisualizer`]; the default shows
//! nothing.

use super::node::NodeId;

/// Strategy for highlighting the selected model node.
///
/// Both hooks default to doing nothing, so an implementation only overrides what it
/// needs.
pub trait SelectionVisualizer {
    /// Called when `node` becomes the selected model.
    fn apply_selection_visual(&mut self, _node: NodeId) {}

    /// Called when `node` stops being the selected model, including when its placement
    /// is deleted.
    fn remove_selection_visual(&mut self, _node: NodeId) {}
}

/// Selection with no visual feedback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSelectionVisual;

impl SelectionVisualizer for NoSelectionVisual {}
