//! # Placement Picking
//!
//! Ray-casting against the bounding boxes of placed models, so a host that only knows
//! where on screen the user tapped can still resolve which placement was hit.
//!
//! ## How it works
//!
//! 1. **Screen to Ray**: The host unprojects the tap into a world-space [`Ray`]
//! 2. **Ray-Box Intersection**: Each model's box is moved into world space and tested
//! 3. **Selection**: The closest intersected placement wins
//!
//! ## Usage
//!
//! ```rust
//! use perch::scene::picking::Ray;
//! use cgmath::Vector3;
//!
//! let ray = Ray::new(Vector3::new(0.0, 0.5, 5.0), Vector3::new(0.0, 0.0, -1.0));
//! // if let Some(hit) = graph.pick(&ray) { graph.toggle_overlay(hit.placement); }
//! ```

use cgmath::{ElementWise, InnerSpace, Matrix4, Vector3, Vector4};

use super::graph::PlacementId;

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box; doubles as a model's collision volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Builds a box from a flat `[x, y, z, x, y, z, ...]` position buffer.
    ///
    /// Returns `None` for an empty buffer: no geometry, no box.
    pub fn from_positions(positions: &[f32]) -> Option<Self> {
        let mut points = positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]));

        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |aabb, v| aabb.including(v)))
    }

    fn including(self, v: Vector3<f32>) -> Self {
        Self {
            min: Vector3::new(self.min.x.min(v.x), self.min.y.min(v.y), self.min.z.min(v.z)),
            max: Vector3::new(self.max.x.max(v.x), self.max.y.max(v.y), self.max.z.max(v.z)),
        }
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn height(&self) -> f32 {
        self.size().y
    }

    /// Merges another box into this one.
    pub fn union(&self, other: &Aabb) -> Self {
        self.including(other.min).including(other.max)
    }

    /// Test ray-AABB intersection
    /// Returns the distance to intersection point, or None if no intersection
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Apply a transformation matrix to the box, returning the box around the 8
    /// transformed corners.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let project = |corner: &Vector3<f32>| {
            let t = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
            Vector3::new(t.x / t.w, t.y / t.w, t.z / t.w)
        };

        let first = project(&corners[0]);
        corners[1..]
            .iter()
            .map(project)
            .fold(Self::new(first, first), |aabb, v| aabb.including(v))
    }
}

/// Result of a placement picking operation
#[derive(Debug, Clone, Copy)]
pub struct PickResult {
    /// The placement whose model was hit
    pub placement: PlacementId,
    /// Distance along the ray to the hit
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_positions() {
        let positions = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
        let aabb = Aabb::from_positions(&positions).unwrap();

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.height(), 2.0);
    }

    #[test]
    fn test_empty_positions_have_no_box() {
        assert!(Aabb::from_positions(&[]).is_none());
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        // Ray hitting the box
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        let distance = aabb.intersect_ray(&ray).unwrap();
        assert!((distance - 4.0).abs() < 1e-5);

        // Ray missing the box
        let ray_miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }

    #[test]
    fn test_transform_translates_box() {
        let aabb = Aabb::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 2.0, 1.0));
        let moved = aabb.transform(&Matrix4::from_translation(Vector3::new(3.0, 0.0, -1.0)));

        assert_eq!(moved.min, Vector3::new(3.0, 0.0, -1.0));
        assert_eq!(moved.max, Vector3::new(4.0, 2.0, 0.0));
    }
}
