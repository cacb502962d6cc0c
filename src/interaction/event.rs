use cgmath::{Deg, Vector3};

use crate::scene::{NodeId, PlacementId, Ray};
use crate::tracking::SurfaceHit;

/// Input delivered by the host UI.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A tap that hit a detected surface
    SurfaceTap(SurfaceHit),
    /// A tap the host already resolved to a scene node
    NodeTap(NodeId),
    /// A tap the host could only express as a world-space ray
    RayTap(Ray),
    /// The overlay control of a placement was activated
    OverlayActivated(PlacementId),
    /// A drag or rotate gesture on a placed model
    ModelTransform {
        placement: PlacementId,
        gesture: TransformGesture,
    },
    /// The capture button
    Capture(CaptureEvent),
}

/// Phases of a transform gesture on a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformGesture {
    Begin,
    Translate(Vector3<f32>),
    Rotate(Deg<f32>),
    End,
}

/// Capture button events, in the order the host reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Short press and release
    Click,
    /// Press held past the long-press threshold
    LongPress,
    /// Finger lifted
    Release,
}
