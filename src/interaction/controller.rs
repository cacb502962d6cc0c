//! Routing of host input into placement, toggling, deletion and capture.
//!
//! Placement is asynchronous: a confirmed double-tap starts a joined load on the
//! spawner, and the finished result is posted back through a channel. The scene thread
//! picks results up in [`InteractionController::drain_completions`], which is the only
//! place new hierarchies are built.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use futures::task::{Spawn, SpawnExt};
use log::{debug, info, warn};

use super::capture::{CaptureCollaborator, DisabledCapture, LogNotifier, Notifier};
use super::event::{CaptureEvent, InputEvent, TransformGesture};
use super::gate::{Confirmed, PlacementGate};
use crate::assets::{AssetLoader, LoadedAssets, ModelId, RenderableLoader, WorkerSpawner};
use crate::config::SessionConfig;
use crate::error::PlacementError;
use crate::scene::{NodeId, NodeKind, PlacementId, Ray, SceneNodeGraph};
use crate::tracking::{SurfaceHit, TrackingService};

/// A joined load between gesture confirmation and placement.
#[derive(Debug, Clone)]
pub struct PendingLoad {
    pub hit: SurfaceHit,
    pub model: ModelId,
    pub started: Instant,
}

struct LoadCompletion {
    load: u64,
    result: Result<LoadedAssets, PlacementError>,
}

/// Wires host input to the gate, the asset loader and the scene graph.
pub struct InteractionController<L> {
    config: SessionConfig,
    gate: PlacementGate,
    assets: AssetLoader<L>,
    spawner: Box<dyn Spawn>,
    capture: Box<dyn CaptureCollaborator>,
    notifier: Box<dyn Notifier>,
    pending: HashMap<u64, PendingLoad>,
    next_load: u64,
    completions_tx: Sender<LoadCompletion>,
    completions_rx: Receiver<LoadCompletion>,
    placements: Vec<PlacementId>,
    capturing: bool,
    guidance_hidden: bool,
}

impl<L: RenderableLoader> InteractionController<L> {
    pub fn new(config: SessionConfig, loader: L) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel();
        Self {
            gate: PlacementGate::new(config.double_tap_window),
            config,
            assets: AssetLoader::new(loader),
            spawner: Box::new(WorkerSpawner::default()),
            capture: Box::new(DisabledCapture),
            notifier: Box::new(LogNotifier),
            pending: HashMap::new(),
            next_load: 1,
            completions_tx,
            completions_rx,
            placements: Vec::new(),
            capturing: false,
            guidance_hidden: false,
        }
    }

    /// Sets the executor joined loads run on.
    pub fn set_spawner(&mut self, spawner: Box<dyn Spawn>) {
        self.spawner = spawner;
    }

    pub fn set_capture(&mut self, capture: Box<dyn CaptureCollaborator>) {
        self.capture = capture;
    }

    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = notifier;
    }

    /// Dispatches one input event.
    pub fn handle(&mut self, event: InputEvent, graph: &mut SceneNodeGraph) {
        match event {
            InputEvent::SurfaceTap(hit) => self.on_surface_tap(hit),
            InputEvent::NodeTap(node) => self.on_node_tap(node, graph),
            InputEvent::RayTap(ray) => self.on_ray_tap(&ray, graph),
            InputEvent::OverlayActivated(placement) => self.on_overlay_activated(placement, graph),
            InputEvent::ModelTransform { placement, gesture } => {
                self.on_model_transform(placement, gesture, graph)
            }
            InputEvent::Capture(event) => self.on_capture(event),
        }
    }

    /// Feeds a surface tap to the gate and starts a load when it confirms.
    pub fn on_surface_tap(&mut self, hit: SurfaceHit) {
        match self.gate.on_tap(hit, hit.timestamp) {
            Some(Confirmed(hit)) => self.start_load(hit),
            None => debug!("Surface tap at {:?} awaiting second tap", hit.location),
        }
    }

    fn start_load(&mut self, hit: SurfaceHit) {
        let load = self.next_load;
        self.next_load += 1;

        let model = self.config.model.asset.clone();
        let overlay = &self.config.overlay;
        let joined = self.assets.load(&model, || overlay.clone());
        let tx = self.completions_tx.clone();

        let spawned = self.spawner.spawn(async move {
            let result = joined.await;
            // The session may have ended; nobody is left to place the result.
            let _ = tx.send(LoadCompletion { load, result });
        });

        match spawned {
            Ok(()) => {
                debug!("Started load #{} of `{}`", load, model);
                self.pending.insert(
                    load,
                    PendingLoad {
                        hit,
                        model,
                        started: Instant::now(),
                    },
                );
            }
            Err(e) => {
                warn!("Could not start load of `{}`: {}", model, e);
                self.notifier.notify(&format!("Could not load {}", self.config.model.name));
            }
        }
    }

    /// Places every load that finished since the last call. Returns how many placements
    /// were created.
    ///
    /// Must run on the thread that owns `graph`, before the frame is rendered.
    pub fn drain_completions(
        &mut self,
        graph: &mut SceneNodeGraph,
        tracking: &mut dyn TrackingService,
    ) -> usize {
        let mut placed = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            let Some(pending) = self.pending.remove(&completion.load) else {
                warn!("Dropping completion for unknown load #{}", completion.load);
                continue;
            };

            let outcome = completion.result.and_then(|assets| {
                let anchor = tracking.create_anchor(&pending.hit);
                graph.place(anchor, assets.model, assets.overlay)
            });

            match outcome {
                Ok(id) => {
                    info!(
                        "Load #{} placed as {} after {:?}",
                        completion.load,
                        id,
                        pending.started.elapsed()
                    );
                    self.placements.push(id);
                    self.after_placement(tracking);
                    placed += 1;
                }
                Err(e) => {
                    warn!("Placement of `{}` abandoned: {}", pending.model, e);
                    self.notifier.notify(&format!("Some Error->{}", e));
                }
            }
        }
        placed
    }

    fn after_placement(&mut self, tracking: &mut dyn TrackingService) {
        if self.config.hide_surface_guidance_after_placement && !self.guidance_hidden {
            tracking.set_surface_guidance_visible(false);
            self.guidance_hidden = true;
        }
    }

    fn on_node_tap(&mut self, node: NodeId, graph: &mut SceneNodeGraph) {
        let Some(placement) = graph.placement_for_node(node) else {
            debug!("Tap on untracked node {:?}", node);
            return;
        };

        match graph.nodes().node(node).kind {
            NodeKind::Model => self.on_model_tap(placement, graph),
            NodeKind::Overlay if graph.nodes().node(node).renderable.is_some() => {
                self.on_overlay_activated(placement, graph)
            }
            _ => debug!("Ignoring tap on {:?} of {}", node, placement),
        }
    }

    fn on_ray_tap(&mut self, ray: &Ray, graph: &mut SceneNodeGraph) {
        match graph.pick(ray) {
            Some(hit) => self.on_model_tap(hit.placement, graph),
            None => debug!("Ray tap hit no placement"),
        }
    }

    /// Toggles the placement's overlay unless its model is being dragged.
    pub fn on_model_tap(&mut self, placement: PlacementId, graph: &mut SceneNodeGraph) {
        let Some(record) = graph.record(placement) else {
            warn!("Model tap for {} which no longer exists", placement);
            return;
        };
        if record.is_transforming() {
            debug!("Ignoring tap on {} while it is being transformed", placement);
            return;
        }

        graph.select(placement);
        graph.toggle_overlay(placement);
    }

    /// Deletes the placement whose overlay control was activated.
    pub fn on_overlay_activated(&mut self, placement: PlacementId, graph: &mut SceneNodeGraph) {
        if !graph.contains(placement) {
            warn!("Delete requested for {} which no longer exists", placement);
            return;
        }

        graph.delete(placement);
        self.placements.retain(|p| *p != placement);
    }

    fn on_model_transform(
        &mut self,
        placement: PlacementId,
        gesture: TransformGesture,
        graph: &mut SceneNodeGraph,
    ) {
        if !graph.contains(placement) {
            warn!("Transform gesture for {} which no longer exists", placement);
            return;
        }

        match gesture {
            TransformGesture::Begin => graph.begin_transform(placement),
            TransformGesture::Translate(delta) => graph.translate_model(placement, delta),
            TransformGesture::Rotate(angle) => graph.rotate_model(placement, angle),
            TransformGesture::End => graph.end_transform(placement),
        }
    }

    /// Applies the capture button policy: click for a snapshot, hold to record.
    pub fn on_capture(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Click if self.capturing => {
                debug!("Snapshot suppressed while recording");
            }
            CaptureEvent::Click => {
                if let Err(e) = self.capture.take_snapshot() {
                    warn!("Snapshot failed: {}", e);
                    self.notifier.notify(&e.to_string());
                }
            }
            CaptureEvent::LongPress => {
                self.capturing = self.capture.toggle_video_capture();
                debug!("Recording: {}", self.capturing);
            }
            CaptureEvent::Release if self.capturing => {
                self.capturing = self.capture.toggle_video_capture();
                self.notifier.notify(&self.config.video_saved_message);
            }
            CaptureEvent::Release => {}
        }
    }

    /// True while a video capture is in progress.
    pub fn capturing(&self) -> bool {
        self.capturing
    }

    pub fn gate(&self) -> &PlacementGate {
        &self.gate
    }

    pub fn pending_loads(&self) -> impl Iterator<Item = &PendingLoad> {
        self.pending.values()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Placements created through this controller that have not been deleted.
    pub fn placements(&self) -> &[PlacementId] {
        &self.placements
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
