use cgmath::{InnerSpace, One, Quaternion};

use super::transform::NodeTransform;
use crate::assets::Renderable;

/// Generational handle to a node in a [`NodeArena`].
///
/// A handle whose node has been freed no longer resolves, even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Role of a node inside a placement hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a placement, posed by a tracking anchor
    Anchor,
    /// The placed model; target of selection and transform gestures
    Model,
    /// The control floating above the model
    Overlay,
}

#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub local: NodeTransform,
    pub renderable: Option<Renderable>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, local: NodeTransform) -> Self {
        Self {
            kind,
            local,
            renderable: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Storage for every scene node plus the scene root's child list.
///
/// Nodes are attached to the scene only through the root list; a node hierarchy that
/// is built but not attached is invisible to the renderer.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Resolves a handle the caller knows to be live.
    ///
    /// # Panics
    /// Panics if the node was freed.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }

    /// Mutable counterpart of [`node`](Self::node).
    ///
    /// # Panics
    /// Panics if the node was freed.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes `child` a child of `parent`. The child must not already have a parent.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        assert!(
            self.node(child).parent.is_none(),
            "node {:?} already has a parent",
            child
        );
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Adds a parentless node to the scene root.
    pub fn attach_root(&mut self, id: NodeId) {
        assert!(self.node(id).parent.is_none(), "only parentless nodes attach to the root");
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Removes a node from the scene root. Returns false if it was not attached.
    pub fn detach_root(&mut self, id: NodeId) -> bool {
        match self.roots.iter().position(|root| *root == id) {
            Some(position) => {
                self.roots.swap_remove(position);
                true
            }
            None => false,
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// True if the node is reachable from the scene root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            match self.get(current) {
                Some(node) => match node.parent {
                    Some(parent) => current = parent,
                    None => return self.roots.contains(&current),
                },
                None => return false,
            }
        }
    }

    /// Frees `root` and all of its descendants, detaching `root` from the scene root
    /// and from its parent first. Returns the number of nodes freed.
    pub fn remove_subtree(&mut self, root: NodeId) -> usize {
        self.detach_root(root);
        if let Some(parent) = self.node(root).parent {
            self.node_mut(parent).children.retain(|child| *child != root);
        }

        let mut stack = vec![root];
        let mut freed = 0;
        while let Some(id) = stack.pop() {
            let slot = &mut self.slots[id.index as usize];
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                freed += 1;
            }
        }
        freed
    }

    /// The node's transform in world space. Walks the parent chain without allocating.
    pub fn world_transform(&self, id: NodeId) -> NodeTransform {
        let node = self.node(id);
        let mut world = node.local;
        let mut parent = node.parent;
        while let Some(parent_id) = parent {
            let parent_node = self.node(parent_id);
            world = parent_node.local.then(&world);
            parent = parent_node.parent;
        }
        world
    }

    /// Sets the node's local rotation so that its world rotation equals `rotation`.
    pub fn set_world_rotation(&mut self, id: NodeId, rotation: Quaternion<f32>) {
        let parent_rotation = match self.node(id).parent {
            Some(parent) => self.world_transform(parent).rotation,
            None => Quaternion::one(),
        };
        self.node_mut(id).local.rotation = (parent_rotation.conjugate() * rotation).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Rotation3, Vector3};

    fn arena_with_chain() -> (NodeArena, NodeId, NodeId, NodeId) {
        let mut arena = NodeArena::new();
        let anchor = arena.insert(Node::new(
            NodeKind::Anchor,
            NodeTransform::from_translation(Vector3::new(0.0, 0.0, -1.0)),
        ));
        let model = arena.insert(Node::new(NodeKind::Model, NodeTransform::identity()));
        let overlay = arena.insert(Node::new(
            NodeKind::Overlay,
            NodeTransform::from_translation(Vector3::new(0.0, 0.5, 0.0)),
        ));
        arena.set_parent(model, anchor);
        arena.set_parent(overlay, model);
        arena.attach_root(anchor);
        (arena, anchor, model, overlay)
    }

    #[test]
    fn test_world_transform_accumulates_parents() {
        let (arena, _, _, overlay) = arena_with_chain();
        let world = arena.world_transform(overlay);
        assert!((world.translation - Vector3::new(0.0, 0.5, -1.0)).magnitude() < 1e-6);
        assert!(arena.is_attached(overlay));
    }

    #[test]
    fn test_remove_subtree_frees_everything() {
        let (mut arena, anchor, model, overlay) = arena_with_chain();
        assert_eq!(arena.len(), 3);

        assert_eq!(arena.remove_subtree(anchor), 3);
        assert!(arena.is_empty());
        assert!(arena.roots().is_empty());
        assert!(!arena.contains(model));
        assert!(!arena.contains(overlay));
    }

    #[test]
    fn test_reused_slot_rejects_stale_handle() {
        let (mut arena, anchor, _, _) = arena_with_chain();
        arena.remove_subtree(anchor);

        let fresh = arena.insert(Node::new(NodeKind::Anchor, NodeTransform::identity()));
        assert!(arena.contains(fresh));
        assert!(!arena.contains(anchor));
        assert!(!arena.is_attached(fresh));
    }

    #[test]
    #[should_panic(expected = "stale node handle")]
    fn test_stale_handle_panics() {
        let (mut arena, anchor, _, overlay) = arena_with_chain();
        arena.remove_subtree(anchor);
        arena.world_transform(overlay);
    }

    #[test]
    fn test_world_rotation_compensates_for_parent() {
        let (mut arena, _, model, overlay) = arena_with_chain();
        arena.node_mut(model).local.rotation = Quaternion::from_angle_y(Deg(90.0));

        let target = Quaternion::from_angle_y(Deg(30.0));
        arena.set_world_rotation(overlay, target);

        let world = arena.world_transform(overlay).rotation;
        let probe = Vector3::new(0.0, 0.0, 1.0);
        assert!(((world * probe) - (target * probe)).magnitude() < 1e-5);
    }
}
