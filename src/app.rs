use cgmath::Vector3;
use futures::task::Spawn;
use log::debug;

use crate::{
    assets::RenderableLoader,
    billboard::{BillboardStats, BillboardUpdater},
    config::SessionConfig,
    interaction::{CaptureCollaborator, InputEvent, InteractionController, Notifier},
    scene::{DrawItem, SceneNodeGraph, SelectionVisualizer},
    tracking::TrackingService,
};

/// What happened during one [`ArSession::on_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame counter, starting at 1
    pub frame: u64,
    /// Placements created from loads that finished since the previous frame
    pub placed: usize,
    pub billboard: BillboardStats,
}

/// One AR placement session.
///
/// The session owns the scene graph and must stay on the thread that renders it.
/// Loads run on the configured spawner; their results are applied at the start of the
/// next [`on_frame`](Self::on_frame), before overlays are reoriented.
pub struct ArSession<L, T> {
    tracking: T,
    graph: SceneNodeGraph,
    billboard: BillboardUpdater,
    controller: InteractionController<L>,
    frames: u64,
}

impl<L: RenderableLoader, T: TrackingService> ArSession<L, T> {
    /// Create a new session with worker-thread loading, no capture backend and
    /// notifications sent to the log
    pub fn new(config: SessionConfig, loader: L, tracking: T) -> Self {
        debug!(
            "Starting session: model `{}`, double-tap window {:?}",
            config.model.asset, config.double_tap_window
        );

        Self {
            tracking,
            graph: SceneNodeGraph::new(),
            billboard: BillboardUpdater::new(),
            controller: InteractionController::new(config, loader),
            frames: 0,
        }
    }

    /// Run loads on `spawner` instead of dedicated worker threads
    pub fn with_spawner(mut self, spawner: impl Spawn + 'static) -> Self {
        self.controller.set_spawner(Box::new(spawner));
        self
    }

    pub fn with_capture(mut self, capture: impl CaptureCollaborator + 'static) -> Self {
        self.controller.set_capture(Box::new(capture));
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.controller.set_notifier(Box::new(notifier));
        self
    }

    /// Replaces the selection highlight. Call before anything is placed.
    pub fn with_selection_visualizer(
        mut self,
        visualizer: impl SelectionVisualizer + 'static,
    ) -> Self {
        assert!(
            self.graph.is_empty(),
            "selection visualizer must be set before placing"
        );
        self.graph = SceneNodeGraph::with_selection_visualizer(Box::new(visualizer));
        self
    }

    /// Feed one input event from the host UI
    pub fn handle_input(&mut self, event: InputEvent) {
        self.controller.handle(event, &mut self.graph);
    }

    /// Call once per rendered frame, before drawing.
    ///
    /// Places finished loads, then turns visible overlays toward the observer.
    pub fn on_frame(&mut self) -> FrameStats {
        self.frames += 1;

        let placed = self
            .controller
            .drain_completions(&mut self.graph, &mut self.tracking);
        let observer: Vector3<f32> = self.tracking.observer_position();
        let billboard = self.billboard.on_frame(&mut self.graph, observer);

        FrameStats {
            frame: self.frames,
            placed,
            billboard,
        }
    }

    /// Fills `out` with one draw per visible renderable.
    pub fn collect_draws(&self, out: &mut Vec<DrawItem>) {
        self.graph.collect_draws(out);
    }

    pub fn graph(&self) -> &SceneNodeGraph {
        &self.graph
    }

    pub fn tracking(&self) -> &T {
        &self.tracking
    }

    pub fn tracking_mut(&mut self) -> &mut T {
        &mut self.tracking
    }

    pub fn controller(&self) -> &InteractionController<L> {
        &self.controller
    }

    pub fn config(&self) -> &SessionConfig {
        self.controller.config()
    }

    /// Frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
