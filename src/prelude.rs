//! # Perch Prelude
//!
//! Commonly used types and traits, re-exported to cut down on imports in host
//! applications.
//!
//! ## Usage
//!
//! ```no_run
//! use perch::prelude::*;
//! use std::time::Instant;
//!
//! let mut session = perch::default("assets", StaticTracking::new(Vector3::new(0.0, 1.6, 0.0)));
//!
//! let hit = SurfaceHit::new(Vector3::new(0.0, 0.0, -1.0), Quaternion::one(), Instant::now());
//! session.handle_input(InputEvent::SurfaceTap(hit));
//! session.handle_input(InputEvent::SurfaceTap(hit));
//!
//! // Once per rendered frame:
//! let stats = session.on_frame();
//! println!("placed {} this frame", stats.placed);
//! ```

// Re-export core session types
pub use crate::app::{ArSession, FrameStats};
pub use crate::config::SessionConfig;
pub use crate::default;

// Re-export asset types
pub use crate::assets::{
    ModelDescriptor, ModelHandle, ModelId, ObjModelLoader, OverlayDescriptor, OverlayHandle,
    RenderableLoader, WorkerSpawner,
};

// Re-export scene types
pub use crate::scene::{DrawItem, NodeId, PlacementId, Ray, SceneNodeGraph, SelectionVisualizer};

// Re-export interaction types
pub use crate::interaction::{
    CaptureCollaborator, CaptureEvent, InputEvent, Notifier, TransformGesture,
};

// Re-export tracking boundary
pub use crate::tracking::{Anchor, StaticTracking, SurfaceHit, TrackingService};

// Re-export error types
pub use crate::error::{CaptureError, LoadError, PlacementError};

// Re-export common external dependencies
pub use cgmath::{Deg, One, Quaternion, Vector3};
