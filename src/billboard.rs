//! Per-frame orientation of overlay controls toward the observer.
//!
//! Every tracked overlay with a renderable is turned so its +Z axis points at the
//! observer with world +Y as up. Hidden overlays are skipped but stay tracked, so they
//! face the right way on the first frame they are shown again.
//!
//! The pass visits each tracked overlay once and allocates nothing.

use cgmath::Vector3;

use crate::scene::{look_rotation, SceneNodeGraph};

/// Counters for one billboard pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillboardStats {
    /// Overlays whose rotation was written
    pub reoriented: usize,
    /// Tracked overlays skipped because they are hidden
    pub skipped_hidden: usize,
    /// Visible overlays left unchanged because no orientation was defined
    pub degenerate: usize,
}

/// Reorients tracked overlays once per rendered frame.
#[derive(Debug, Clone)]
pub struct BillboardUpdater {
    up: Vector3<f32>,
    last: BillboardStats,
}

impl BillboardUpdater {
    pub fn new() -> Self {
        Self {
            up: Vector3::unit_y(),
            last: BillboardStats::default(),
        }
    }

    /// Runs one pass against the observer's world position.
    pub fn on_frame(
        &mut self,
        graph: &mut SceneNodeGraph,
        observer: Vector3<f32>,
    ) -> BillboardStats {
        let mut stats = BillboardStats::default();
        let (tracked, nodes) = graph.billboard_targets();

        for id in tracked.iter() {
            if nodes.node(id).renderable.is_none() {
                stats.skipped_hidden += 1;
                continue;
            }

            let position = nodes.world_transform(id).translation;
            match look_rotation(observer - position, self.up) {
                Some(rotation) => {
                    nodes.set_world_rotation(id, rotation);
                    stats.reoriented += 1;
                }
                None => stats.degenerate += 1,
            }
        }

        self.last = stats;
        stats
    }

    /// Counters from the most recent pass.
    pub fn last_stats(&self) -> BillboardStats {
        self.last
    }
}

impl Default for BillboardUpdater {
    fn default() -> Self {
        Self::new()
    }
}
