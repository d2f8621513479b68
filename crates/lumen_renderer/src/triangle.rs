//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::Material;
use lumen_math::{Aabb, DVec3, Interval, Ray};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
    /// Pre-computed edges from v0
    e1: DVec3,
    e2: DVec3,
    /// Pre-computed face normal (unit length)
    normal: DVec3,
    material: Material,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The normal is `e1 x e2`, flipped when `(v0 x v1) . v2 >= 0`, i.e. when
    /// the vertices wind anticlockwise as seen from the origin.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3, material: Material) -> Self {
        let e1 = v1 - v0;
        let e2 = v2 - v0;

        let mut normal = e1.cross(e2).normalize();
        if v0.cross(v1).dot(v2) >= 0.0 {
            normal = -normal;
        }

        // Aabb pads thin dimensions, so axis-aligned triangles keep a slab
        let min = v0.min(v1).min(v2);
        let max = v0.max(v1).max(v2);
        let bbox = Aabb::from_points(min, max);

        Self {
            v0,
            v1,
            v2,
            e1,
            e2,
            normal,
            material,
            bbox,
        }
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Barycentric coordinates `(b1, b2)` of the ray's plane crossing with
    /// respect to the edges `v1 - v0` and `v2 - v0`, and the crossing's ray
    /// parameter.
    fn barycentric(&self, ray: &Ray) -> (f64, f64, f64) {
        let s = ray.origin() - self.v0;
        let s1 = ray.direction().cross(self.e2);
        let s2 = s.cross(self.e1);

        let inv = 1.0 / s1.dot(self.e1);

        let b1 = inv * s1.dot(s);
        let b2 = inv * s2.dot(ray.direction());
        let t = inv * s2.dot(self.e2);
        (b1, b2, t)
    }

    /// Möller-Trumbore intersection, clamped into `ray_t`.
    ///
    /// Rays parallel to the triangle make every coordinate non-finite, which
    /// fails the inside test and reports `ray_t.max`.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> f64 {
        let (b1, b2, t) = self.barycentric(ray);

        let inside = b1 >= 0.0 && b2 >= 0.0 && b1 + b2 <= 1.0;
        if !inside {
            return ray_t.max;
        }

        ray_t.clamp(t)
    }

    pub fn normal(&self, _point: DVec3) -> DVec3 {
        self.normal
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
