use std::fmt;

use cgmath::{Deg, Quaternion, Rotation3, Vector3};
use log::{debug, info};

use super::node::{Node, NodeArena, NodeId, NodeKind};
use super::picking::{Aabb, PickResult, Ray};
use super::selection::{NoSelectionVisual, SelectionVisualizer};
use super::tracked::TrackedOverlaySet;
use super::transform::NodeTransform;
use crate::assets::{ModelHandle, OverlayHandle, Renderable};
use crate::error::PlacementError;
use crate::tracking::Anchor;

/// Handle to one placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId(u64);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "placement#{}", self.0)
    }
}

/// Bookkeeping for one placed object: anchor → model → overlay.
#[derive(Debug)]
pub struct PlacementRecord {
    id: PlacementId,
    anchor: Anchor,
    anchor_node: NodeId,
    model_node: NodeId,
    overlay_node: NodeId,
    model: ModelHandle,
    model_bounds: Aabb,
    overlay: OverlayHandle,
    overlay_visible: bool,
    selected: bool,
    transforming: bool,
}

impl PlacementRecord {
    pub fn id(&self) -> PlacementId {
        self.id
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn anchor_node(&self) -> NodeId {
        self.anchor_node
    }

    pub fn model_node(&self) -> NodeId {
        self.model_node
    }

    pub fn overlay_node(&self) -> NodeId {
        self.overlay_node
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn overlay(&self) -> &OverlayHandle {
        &self.overlay
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// True while the user is dragging or rotating the model.
    pub fn is_transforming(&self) -> bool {
        self.transforming
    }
}

/// Owns every placement's node hierarchy and the set of overlays to billboard.
///
/// Only the scene-owning thread touches the graph; loaders hand it finished handles.
pub struct SceneNodeGraph {
    nodes: NodeArena,
    placements: Vec<PlacementRecord>,
    tracked: TrackedOverlaySet,
    selected: Option<PlacementId>,
    selection_visual: Box<dyn SelectionVisualizer>,
    next_placement: u64,
}

impl SceneNodeGraph {
    pub fn new() -> Self {
        Self::with_selection_visualizer(Box::new(NoSelectionVisual))
    }

    pub fn with_selection_visualizer(selection_visual: Box<dyn SelectionVisualizer>) -> Self {
        Self {
            nodes: NodeArena::new(),
            placements: Vec::new(),
            tracked: TrackedOverlaySet::new(),
            selected: None,
            selection_visual,
            next_placement: 1,
        }
    }

    /// Builds the anchor → model → overlay hierarchy and attaches it to the scene.
    ///
    /// The overlay sits `(0, height, 0)` above the model origin, where `height` is the
    /// model's bounding-box height, and starts hidden. The new model becomes the
    /// selection and its overlay is tracked for billboarding.
    ///
    /// Fails with [`PlacementError::GeometryUnavailable`] before creating any node if
    /// the model has no bounds.
    pub fn place(
        &mut self,
        anchor: Anchor,
        model: ModelHandle,
        overlay: OverlayHandle,
    ) -> Result<PlacementId, PlacementError> {
        let model_bounds = model
            .bounds()
            .ok_or_else(|| PlacementError::GeometryUnavailable(model.id().to_string()))?;

        let anchor_node = self.nodes.insert(Node::new(
            NodeKind::Anchor,
            NodeTransform::from_pose(anchor.position(), anchor.rotation()),
        ));

        let model_node = self.nodes.insert(
            Node::new(NodeKind::Model, NodeTransform::identity())
                .with_renderable(Renderable::Model(model.clone())),
        );
        self.nodes.set_parent(model_node, anchor_node);

        let overlay_offset = Vector3::new(0.0, model_bounds.height(), 0.0);
        let overlay_node = self.nodes.insert(Node::new(
            NodeKind::Overlay,
            NodeTransform::from_translation(overlay_offset),
        ));
        self.nodes.set_parent(overlay_node, model_node);

        self.nodes.attach_root(anchor_node);
        self.tracked.insert(overlay_node);

        let id = PlacementId(self.next_placement);
        self.next_placement += 1;
        self.placements.push(PlacementRecord {
            id,
            anchor,
            anchor_node,
            model_node,
            overlay_node,
            model,
            model_bounds,
            overlay,
            overlay_visible: false,
            selected: false,
            transforming: false,
        });
        self.select(id);

        info!(
            "Placed {} (`{}`) with overlay offset {:.3}",
            id,
            self.record_ref(id).model.id(),
            overlay_offset.y
        );
        Ok(id)
    }

    /// Shows the overlay if hidden, hides it if shown. Returns the new visibility.
    ///
    /// # Panics
    /// Panics if the placement was deleted.
    pub fn toggle_overlay(&mut self, id: PlacementId) -> bool {
        let record = self.record_mut(id);
        let visible = !record.overlay_visible;
        record.overlay_visible = visible;
        let overlay_node = record.overlay_node;
        let renderable = visible.then(|| Renderable::Overlay(record.overlay.clone()));

        self.nodes.node_mut(overlay_node).renderable = renderable;
        debug!("{} overlay {}", id, if visible { "shown" } else { "hidden" });
        visible
    }

    /// Detaches and frees the whole hierarchy and stops tracking its overlay.
    /// Returns the number of nodes freed.
    ///
    /// # Panics
    /// Panics if the placement was already deleted.
    pub fn delete(&mut self, id: PlacementId) -> usize {
        let position = self.position(id);
        let record = self.placements.remove(position);

        if self.selected == Some(id) {
            self.selection_visual.remove_selection_visual(record.model_node);
            self.selected = None;
        }
        self.tracked.remove(record.overlay_node);
        let freed = self.nodes.remove_subtree(record.anchor_node);

        info!("Deleted {} ({} nodes)", id, freed);
        freed
    }

    /// Makes `id` the active transform target.
    pub fn select(&mut self, id: PlacementId) {
        if self.selected == Some(id) {
            return;
        }
        let model_node = self.record_ref(id).model_node;
        self.deselect();

        self.record_mut(id).selected = true;
        self.selection_visual.apply_selection_visual(model_node);
        self.selected = Some(id);
    }

    /// Clears the selection, if any.
    pub fn deselect(&mut self) {
        if let Some(previous) = self.selected.take() {
            let record = self.record_mut(previous);
            record.selected = false;
            let model_node = record.model_node;
            self.selection_visual.remove_selection_visual(model_node);
        }
    }

    pub fn selected(&self) -> Option<PlacementId> {
        self.selected
    }

    /// Marks the model as being dragged or rotated; selects it.
    pub fn begin_transform(&mut self, id: PlacementId) {
        self.select(id);
        self.record_mut(id).transforming = true;
    }

    pub fn end_transform(&mut self, id: PlacementId) {
        self.record_mut(id).transforming = false;
    }

    /// Moves the model relative to its anchor.
    pub fn translate_model(&mut self, id: PlacementId, delta: Vector3<f32>) {
        let model_node = self.record_ref(id).model_node;
        self.nodes.node_mut(model_node).local.translation += delta;
    }

    /// Spins the model about its anchor's up axis.
    pub fn rotate_model(&mut self, id: PlacementId, angle: Deg<f32>) {
        let model_node = self.record_ref(id).model_node;
        let local = &mut self.nodes.node_mut(model_node).local;
        local.rotation = Quaternion::from_angle_y(angle) * local.rotation;
    }

    /// Finds the placement whose model box the ray hits first.
    pub fn pick(&self, ray: &Ray) -> Option<PickResult> {
        let mut closest: Option<PickResult> = None;

        for record in &self.placements {
            let world = self.nodes.world_transform(record.model_node);
            let world_bounds = record.model_bounds.transform(&world.to_matrix());

            if let Some(distance) = world_bounds.intersect_ray(ray) {
                if closest.map_or(true, |hit| distance < hit.distance) {
                    closest = Some(PickResult {
                        placement: record.id,
                        distance,
                        intersection_point: ray.point_at(distance),
                    });
                }
            }
        }

        closest
    }

    /// Looks up the placement owning a model or overlay node.
    pub fn placement_for_node(&self, node: NodeId) -> Option<PlacementId> {
        self.placements
            .iter()
            .find(|record| record.model_node == node || record.overlay_node == node)
            .map(|record| record.id)
    }

    pub fn record(&self, id: PlacementId) -> Option<&PlacementRecord> {
        self.placements.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: PlacementId) -> bool {
        self.record(id).is_some()
    }

    pub fn placements(&self) -> impl Iterator<Item = &PlacementRecord> {
        self.placements.iter()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    /// Looks up a node; `None` once its placement is deleted.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Live node count across all placements.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn world_transform(&self, node: NodeId) -> NodeTransform {
        self.nodes.world_transform(node)
    }

    pub fn tracked_overlays(&self) -> &TrackedOverlaySet {
        &self.tracked
    }

    /// Split borrow for the per-frame orientation pass.
    pub(crate) fn billboard_targets(&mut self) -> (&TrackedOverlaySet, &mut NodeArena) {
        (&self.tracked, &mut self.nodes)
    }

    fn position(&self, id: PlacementId) -> usize {
        match self.placements.iter().position(|record| record.id == id) {
            Some(position) => position,
            None => panic!("{} was deleted or never placed", id),
        }
    }

    fn record_ref(&self, id: PlacementId) -> &PlacementRecord {
        &self.placements[self.position(id)]
    }

    fn record_mut(&mut self, id: PlacementId) -> &mut PlacementRecord {
        let position = self.position(id);
        &mut self.placements[position]
    }
}

impl Default for SceneNodeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SceneNodeGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNodeGraph")
            .field("placements", &self.placements.len())
            .field("nodes", &self.nodes.len())
            .field("tracked", &self.tracked.len())
            .field("selected", &self.selected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ModelId, OverlayDescriptor};
    use crate::tracking::AnchorId;
    use cgmath::{InnerSpace, One};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn anchor_at(x: f32, z: f32) -> Anchor {
        Anchor::new(AnchorId(1), Vector3::new(x, 0.0, z), Quaternion::one())
    }

    fn chair() -> ModelHandle {
        ModelHandle::new(
            ModelId::new("chair"),
            Some(Aabb::new(Vector3::new(-0.5, 0.0, -0.5), Vector3::new(0.5, 1.2, 0.5))),
            1,
            24,
        )
    }

    fn delete_button() -> OverlayHandle {
        OverlayHandle::new(OverlayDescriptor::delete_button())
    }

    #[test]
    fn test_place_builds_hierarchy() {
        let mut graph = SceneNodeGraph::new();
        let id = graph.place(anchor_at(0.0, -1.0), chair(), delete_button()).unwrap();
        let record = graph.record(id).unwrap();

        let nodes = graph.nodes();
        assert_eq!(nodes.node(record.overlay_node()).parent(), Some(record.model_node()));
        assert_eq!(nodes.node(record.model_node()).parent(), Some(record.anchor_node()));
        assert_eq!(nodes.roots(), &[record.anchor_node()]);
        assert_eq!(graph.node_count(), 3);

        let offset = nodes.node(record.overlay_node()).local.translation;
        assert!((offset - Vector3::new(0.0, 1.2, 0.0)).magnitude() < 1e-6);

        assert!(!record.overlay_visible());
        assert!(nodes.node(record.overlay_node()).renderable.is_none());
        assert!(graph.tracked_overlays().contains(record.overlay_node()));
        assert_eq!(graph.selected(), Some(id));
        assert!(record.is_selected());
    }

    #[test]
    fn test_missing_geometry_leaves_graph_unchanged() {
        let mut graph = SceneNodeGraph::new();
        let flat = ModelHandle::new(ModelId::new("flat"), None, 0, 0);

        let result = graph.place(anchor_at(0.0, 0.0), flat, delete_button());

        assert!(matches!(result, Err(PlacementError::GeometryUnavailable(_))));
        assert_eq!(graph.node_count(), 0);
        assert!(graph.nodes().roots().is_empty());
        assert!(graph.tracked_overlays().is_empty());
        assert!(graph.is_empty());
        assert_eq!(graph.selected(), None);
    }

    #[test]
    fn test_toggle_twice_restores_visibility() {
        let mut graph = SceneNodeGraph::new();
        let id = graph.place(anchor_at(0.0, -1.0), chair(), delete_button()).unwrap();
        let overlay_node = graph.record(id).unwrap().overlay_node();

        assert!(graph.toggle_overlay(id));
        assert!(graph.nodes().node(overlay_node).renderable.is_some());
        assert!(graph.tracked_overlays().contains(overlay_node));

        assert!(!graph.toggle_overlay(id));
        assert!(graph.nodes().node(overlay_node).renderable.is_none());
        assert!(graph.tracked_overlays().contains(overlay_node));
        assert!(!graph.record(id).unwrap().overlay_visible());
    }

    #[test]
    fn test_delete_removes_subtree_and_tracking() {
        let mut graph = SceneNodeGraph::new();
        let keep = graph.place(anchor_at(1.0, -1.0), chair(), delete_button()).unwrap();
        let gone = graph.place(anchor_at(-1.0, -1.0), chair(), delete_button()).unwrap();
        let gone_overlay = graph.record(gone).unwrap().overlay_node();

        assert_eq!(graph.delete(gone), 3);

        assert!(!graph.contains(gone));
        assert!(graph.node(gone_overlay).is_none());
        assert!(graph.contains(keep));
        assert!(!graph.tracked_overlays().contains(gone_overlay));
        assert_eq!(graph.tracked_overlays().len(), 1);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes().roots().len(), 1);
        // The deleted placement was selected; selection does not fall back to another.
        assert_eq!(graph.selected(), None);
    }

    #[test]
    #[should_panic(expected = "was deleted or never placed")]
    fn test_double_delete_panics() {
        let mut graph = SceneNodeGraph::new();
        let id = graph.place(anchor_at(0.0, -1.0), chair(), delete_button()).unwrap();
        graph.delete(id);
        graph.delete(id);
    }

    #[test]
    #[should_panic(expected = "was deleted or never placed")]
    fn test_toggle_after_delete_panics() {
        let mut graph = SceneNodeGraph::new();
        let id = graph.place(anchor_at(0.0, -1.0), chair(), delete_button()).unwrap();
        graph.delete(id);
        graph.toggle_overlay(id);
    }

    #[derive(Default)]
    struct RecordingVisual {
        events: Rc<RefCell<Vec<(&'static str, NodeId)>>>,
    }

    impl SelectionVisualizer for RecordingVisual {
        fn apply_selection_visual(&mut self, node: NodeId) {
            self.events.borrow_mut().push(("apply", node));
        }

        fn remove_selection_visual(&mut self, node: NodeId) {
            self.events.borrow_mut().push(("remove", node));
        }
    }

    #[test]
    fn test_selection_moves_to_newest_placement() {
        let visual = RecordingVisual::default();
        let events = visual.events.clone();
        let mut graph = SceneNodeGraph::with_selection_visualizer(Box::new(visual));

        let first = graph.place(anchor_at(1.0, -1.0), chair(), delete_button()).unwrap();
        let second = graph.place(anchor_at(-1.0, -1.0), chair(), delete_button()).unwrap();
        let first_model = graph.record(first).unwrap().model_node();
        let second_model = graph.record(second).unwrap().model_node();

        assert_eq!(
            events.borrow().as_slice(),
            &[
                ("apply", first_model),
                ("remove", first_model),
                ("apply", second_model)
            ]
        );
        assert!(!graph.record(first).unwrap().is_selected());
        assert!(graph.record(second).unwrap().is_selected());

        graph.delete(second);
        assert_eq!(events.borrow().last(), Some(&("remove", second_model)));
    }

    #[test]
    fn test_transform_gestures_move_model_and_overlay() {
        let mut graph = SceneNodeGraph::new();
        let id = graph.place(anchor_at(0.0, -1.0), chair(), delete_button()).unwrap();
        let overlay_node = graph.record(id).unwrap().overlay_node();

        graph.begin_transform(id);
        assert!(graph.record(id).unwrap().is_transforming());
        graph.translate_model(id, Vector3::new(0.5, 0.0, 0.0));
        graph.rotate_model(id, Deg(90.0));
        graph.end_transform(id);
        assert!(!graph.record(id).unwrap().is_transforming());

        // The overlay offset is along the model's up axis, which a yaw does not change.
        let overlay_world = graph.world_transform(overlay_node).translation;
        assert!((overlay_world - Vector3::new(0.5, 1.2, -1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_pick_returns_nearest_placement() {
        let mut graph = SceneNodeGraph::new();
        let near = graph.place(anchor_at(0.0, -2.0), chair(), delete_button()).unwrap();
        let _far = graph.place(anchor_at(0.0, -5.0), chair(), delete_button()).unwrap();

        let ray = Ray::new(Vector3::new(0.0, 0.5, 0.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = graph.pick(&ray).unwrap();
        assert_eq!(hit.placement, near);
        assert!((hit.distance - 1.5).abs() < 1e-5);

        let miss = Ray::new(Vector3::new(3.0, 0.5, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(graph.pick(&miss).is_none());
    }

    #[test]
    fn test_placement_for_node() {
        let mut graph = SceneNodeGraph::new();
        let id = graph.place(anchor_at(0.0, -1.0), chair(), delete_button()).unwrap();
        let record = graph.record(id).unwrap();

        assert_eq!(graph.placement_for_node(record.model_node()), Some(id));
        assert_eq!(graph.placement_for_node(record.overlay_node()), Some(id));
        assert_eq!(graph.placement_for_node(record.anchor_node()), None);
    }
}
