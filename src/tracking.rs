//! Boundary to the external AR tracking service.
//!
//! Pose tracking and plane detection live outside this crate. The session only needs
//! surface hits, anchors created from them, the observer's position each frame, and a
//! way to hide plane-detection guidance.

use std::time::Instant;

use cgmath::{Quaternion, Vector3};

/// A tap that landed on a detected surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Hit point in world space
    pub location: Vector3<f32>,
    /// Orientation of the surface at the hit point
    pub orientation: Quaternion<f32>,
    /// When the tap happened
    pub timestamp: Instant,
}

impl SurfaceHit {
    pub fn new(location: Vector3<f32>, orientation: Quaternion<f32>, timestamp: Instant) -> Self {
        Self {
            location,
            orientation,
            timestamp,
        }
    }
}

/// Identifier assigned to an anchor by the tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

/// A fixed real-world pose owned by the tracking service.
///
/// The session reads it to pose the root of a placement and never changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    id: AnchorId,
    position: Vector3<f32>,
    rotation: Quaternion<f32>,
}

impl Anchor {
    pub fn new(id: AnchorId, position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self {
            id,
            position,
            rotation,
        }
    }

    pub fn id(&self) -> AnchorId {
        self.id
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }
}

/// The external tracking service.
pub trait TrackingService {
    /// Creates an anchor at the hit's pose.
    fn create_anchor(&mut self, hit: &SurfaceHit) -> Anchor;

    /// The observer (camera) position in world space for the current frame.
    fn observer_position(&self) -> Vector3<f32>;

    /// Shows or hides plane-detection visuals and instructions.
    fn set_surface_guidance_visible(&mut self, visible: bool);
}

/// A tracking service with a fixed observer, for headless sessions and tests.
///
/// Anchors are created exactly at the hit pose with increasing ids.
#[derive(Debug, Clone)]
pub struct StaticTracking {
    observer: Vector3<f32>,
    next_anchor: u64,
    guidance_visible: bool,
}

impl StaticTracking {
    pub fn new(observer: Vector3<f32>) -> Self {
        Self {
            observer,
            next_anchor: 1,
            guidance_visible: true,
        }
    }

    /// Moves the observer; takes effect on the next frame.
    pub fn set_observer(&mut self, observer: Vector3<f32>) {
        self.observer = observer;
    }

    pub fn guidance_visible(&self) -> bool {
        self.guidance_visible
    }

    /// Number of anchors created so far.
    pub fn anchors_created(&self) -> u64 {
        self.next_anchor - 1
    }
}

impl TrackingService for StaticTracking {
    fn create_anchor(&mut self, hit: &SurfaceHit) -> Anchor {
        let id = AnchorId(self.next_anchor);
        self.next_anchor += 1;
        Anchor::new(id, hit.location, hit.orientation)
    }

    fn observer_position(&self) -> Vector3<f32> {
        self.observer
    }

    fn set_surface_guidance_visible(&mut self, visible: bool) {
        self.guidance_visible = visible;
    }
}
