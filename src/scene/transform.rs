use cgmath::{InnerSpace, Matrix3, Matrix4, One, Quaternion, Vector3, Zero};

/// Lengths below this are treated as zero when building orientations.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Translation, rotation and uniform scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: f32,
}

impl NodeTransform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zero(),
            rotation: Quaternion::one(),
            scale: 1.0,
        }
    }

    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn from_pose(translation: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self {
            translation,
            rotation,
            scale: 1.0,
        }
    }

    /// Composes `self` (the parent) with a child transform, giving the child's
    /// transform in the parent's parent space.
    pub fn then(&self, child: &NodeTransform) -> NodeTransform {
        NodeTransform {
            translation: self.translation + self.rotation * (child.translation * self.scale),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }

    pub fn transform_point(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.translation + self.rotation * (point * self.scale)
    }

    /// Column-major matrix in T * R * S order.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.translation);
        let r = Matrix4::from(self.rotation);
        let s = Matrix4::from_scale(self.scale);
        t * r * s
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation whose local +Z axis points along `forward` and whose local +Y axis lies in
/// the plane of `forward` and `up`.
///
/// Returns `None` when `forward` has zero length or is parallel to `up`; neither case
/// defines a unique orientation.
pub fn look_rotation(forward: Vector3<f32>, up: Vector3<f32>) -> Option<Quaternion<f32>> {
    if forward.magnitude2() <= DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        return None;
    }
    let forward = forward.normalize();

    let side = up.cross(forward);
    if side.magnitude2() <= DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        return None;
    }
    let side = side.normalize();
    let up = forward.cross(side);

    Some(Quaternion::from(Matrix3::from_cols(side, up, forward)).normalize())
}
