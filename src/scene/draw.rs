//! Hand-off of visible nodes to the external renderer.

use cgmath::Matrix4;

use super::graph::SceneNodeGraph;
use super::node::{NodeArena, NodeId};
use crate::assets::Renderable;

/// Per-node uniform data in the layout a GPU renderer expects.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct NodeUniform {
    /// Column-major world matrix.
    pub model: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for NodeUniform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self {
            model: matrix.into(),
        }
    }
}

/// One renderable node ready for submission.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub node: NodeId,
    pub renderable: Renderable,
    pub uniform: NodeUniform,
}

impl DrawItem {
    /// Uniform bytes for a buffer upload.
    pub fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniform)
    }
}

impl SceneNodeGraph {
    /// Replaces the contents of `out` with every attached node that has a renderable.
    ///
    /// Hidden overlays have no renderable and are left out. Reusing `out` across frames
    /// avoids reallocating it.
    pub fn collect_draws(&self, out: &mut Vec<DrawItem>) {
        out.clear();
        let nodes = self.nodes();
        for &root in nodes.roots() {
            push_subtree(nodes, root, out);
        }
    }
}

fn push_subtree(nodes: &NodeArena, id: NodeId, out: &mut Vec<DrawItem>) {
    let node = nodes.node(id);
    if let Some(renderable) = &node.renderable {
        out.push(DrawItem {
            node: id,
            renderable: renderable.clone(),
            uniform: nodes.world_transform(id).to_matrix().into(),
        });
    }
    for &child in node.children() {
        push_subtree(nodes, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ModelHandle, ModelId, OverlayDescriptor, OverlayHandle};
    use crate::scene::picking::Aabb;
    use crate::tracking::{Anchor, AnchorId};
    use cgmath::{One, Quaternion, Vector3};

    fn placed_graph() -> (SceneNodeGraph, crate::scene::PlacementId) {
        let mut graph = SceneNodeGraph::new();
        let model = ModelHandle::new(
            ModelId::new("chair"),
            Some(Aabb::new(Vector3::new(-0.5, 0.0, -0.5), Vector3::new(0.5, 1.0, 0.5))),
            1,
            8,
        );
        let id = graph
            .place(
                Anchor::new(AnchorId(7), Vector3::new(2.0, 0.0, -3.0), Quaternion::one()),
                model,
                OverlayHandle::new(OverlayDescriptor::delete_button()),
            )
            .unwrap();
        (graph, id)
    }

    #[test]
    fn test_hidden_overlay_is_not_drawn() {
        let (mut graph, id) = placed_graph();
        let mut draws = Vec::new();

        graph.collect_draws(&mut draws);
        assert_eq!(draws.len(), 1);
        assert!(draws[0].renderable.is_model());

        graph.toggle_overlay(id);
        graph.collect_draws(&mut draws);
        assert_eq!(draws.len(), 2);
        assert!(draws.iter().any(|item| item.renderable.is_overlay()));
    }

    #[test]
    fn test_uniform_carries_world_translation() {
        let (graph, _) = placed_graph();
        let mut draws = Vec::new();
        graph.collect_draws(&mut draws);

        let model = draws[0].uniform.model;
        assert_eq!(model[3][0], 2.0);
        assert_eq!(model[3][2], -3.0);
        assert_eq!(draws[0].uniform_bytes().len(), 64);
    }

    #[test]
    fn test_deleted_placement_is_not_drawn() {
        let (mut graph, id) = placed_graph();
        graph.delete(id);

        let mut draws = Vec::new();
        graph.collect_draws(&mut draws);
        assert!(draws.is_empty());
    }
}
