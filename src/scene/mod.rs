//! # Scene Management Module
//!
//! This module owns the node hierarchies of placed objects. Each placement is a small
//! tree rooted at a tracking anchor:
//!
//! ```text
//! scene root
//!   └── anchor node      (pose from the tracking service)
//!         └── model node (model renderable, selection + drag state)
//!               └── overlay node (delete control, shown or hidden)
//! ```
//!
//! ## Key Components
//!
//! - [`SceneNodeGraph`] - Creates, toggles and deletes placements; tracks overlays
//! - [`NodeArena`] - Generational node storage and the scene root list
//! - [`TrackedOverlaySet`] - Overlays the billboard pass visits every frame
//! - [`SelectionVisualizer`] - Pluggable highlight for the selected model
//! - [`picking`] - Ray casts against placed models
//! - [`draw`] - World matrices for the external renderer
//!
//! ## Usage
//!
//! ```no_run
//! use perch::scene::SceneNodeGraph;
//!
//! let mut graph = SceneNodeGraph::new();
//! // let id = graph.place(anchor, model, overlay)?;
//! // graph.toggle_overlay(id);
//! // graph.delete(id);
//! ```

pub mod draw;
pub mod graph;
pub mod node;
pub mod picking;
pub mod selection;
pub mod tracked;
pub mod transform;

// Re-export main types
pub use draw::{DrawItem, NodeUniform};
pub use graph::{PlacementId, PlacementRecord, SceneNodeGraph};
pub use node::{Node, NodeArena, NodeId, NodeKind};
pub use picking::{Aabb, PickResult, Ray};
pub use selection::{NoSelectionVisual, SelectionVisualizer};
pub use tracked::TrackedOverlaySet;
pub use transform::{look_rotation, NodeTransform};
