use super::node::NodeId;

/// Overlay nodes of every live placement, in insertion order modulo removals.
///
/// Membership follows the placement lifecycle only: a node enters when its placement is
/// created and leaves when the placement is deleted. Hiding or showing an overlay never
/// changes membership.
#[derive(Debug, Default)]
pub struct TrackedOverlaySet {
    nodes: Vec<NodeId>,
}

impl TrackedOverlaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if the node is already tracked.
    pub fn insert(&mut self, node: NodeId) {
        assert!(!self.contains(node), "overlay {:?} is already tracked", node);
        self.nodes.push(node);
    }

    /// # Panics
    /// Panics if the node is not tracked; removing twice means a placement was
    /// deleted twice.
    pub fn remove(&mut self, node: NodeId) {
        match self.nodes.iter().position(|tracked| *tracked == node) {
            Some(position) => {
                self.nodes.swap_remove(position);
            }
            None => panic!("overlay {:?} is not tracked", node),
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}
