//! Immutable handles to loaded renderables.
//!
//! Handles are produced on loader workers and handed to the scene thread. They are
//! reference counted and never mutated after construction, so sharing them across the
//! thread boundary needs no synchronisation beyond the `Arc`.

use std::fmt;
use std::sync::Arc;

use crate::scene::picking::Aabb;

/// Identifier of a model asset understood by a [`RenderableLoader`](super::RenderableLoader).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A user-selectable model: display name plus the asset backing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    pub name: String,
    pub asset: ModelId,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, asset: impl Into<ModelId>) -> Self {
        Self {
            name: name.into(),
            asset: asset.into(),
        }
    }
}

/// Description of the 2D control rendered above a placed model.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayDescriptor {
    /// Button caption
    pub label: String,
    /// RGBA background colour
    pub background: [f32; 4],
    /// RGBA caption colour
    pub text_color: [f32; 4],
}

impl OverlayDescriptor {
    /// The red "Delete" button attached to every placement by default.
    pub fn delete_button() -> Self {
        Self {
            label: "Delete".to_string(),
            background: [1.0, 0.0, 0.0, 1.0],
            text_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Default for OverlayDescriptor {
    fn default() -> Self {
        Self::delete_button()
    }
}

#[derive(Debug)]
struct ModelData {
    id: ModelId,
    bounds: Option<Aabb>,
    mesh_count: usize,
    vertex_count: usize,
}

/// A loaded, ready-to-attach model renderable.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    inner: Arc<ModelData>,
}

impl ModelHandle {
    /// Creates a handle. `bounds` is the model-space collision box, if the asset has one.
    pub fn new(id: ModelId, bounds: Option<Aabb>, mesh_count: usize, vertex_count: usize) -> Self {
        Self {
            inner: Arc::new(ModelData {
                id,
                bounds,
                mesh_count,
                vertex_count,
            }),
        }
    }

    pub fn id(&self) -> &ModelId {
        &self.inner.id
    }

    /// Model-space bounding box; `None` when the asset carries no usable geometry.
    pub fn bounds(&self) -> Option<Aabb> {
        self.inner.bounds
    }

    pub fn mesh_count(&self) -> usize {
        self.inner.mesh_count
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.vertex_count
    }

    /// True when both handles refer to the same loaded asset instance.
    pub fn ptr_eq(&self, other: &ModelHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// A loaded, ready-to-attach overlay renderable.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    descriptor: Arc<OverlayDescriptor>,
}

impl OverlayHandle {
    pub fn new(descriptor: OverlayDescriptor) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
        }
    }

    pub fn descriptor(&self) -> &OverlayDescriptor {
        &self.descriptor
    }

    pub fn ptr_eq(&self, other: &OverlayHandle) -> bool {
        Arc::ptr_eq(&self.descriptor, &other.descriptor)
    }
}

/// Anything a scene node can display.
#[derive(Debug, Clone)]
pub enum Renderable {
    Model(ModelHandle),
    Overlay(OverlayHandle),
}

impl Renderable {
    pub fn is_model(&self) -> bool {
        matches!(self, Renderable::Model(_))
    }

    pub fn is_overlay(&self) -> bool {
        matches!(self, Renderable::Overlay(_))
    }
}
