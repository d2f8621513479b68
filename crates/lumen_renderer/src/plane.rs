//! Infinite plane primitive.

use crate::Material;
use lumen_math::{Aabb, DVec3, Interval, Ray};

/// An infinite plane through `center`.
///
/// Planes are unbounded, so their bounding box is [`Aabb::UNIVERSE`].
#[derive(Debug, Clone)]
pub struct Plane {
    center: DVec3,
    normal: DVec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. The normal is normalized; it must not be zero.
    pub fn new(center: DVec3, normal: DVec3, material: Material) -> Self {
        Self {
            center,
            normal: normal.normalize(),
            material,
        }
    }

    /// Linear solve for the crossing, clamped into `ray_t`.
    ///
    /// A ray parallel to the plane divides by zero; the resulting infinity
    /// (or NaN when the ray lies in the plane) clamps to a bound and reads as
    /// a miss.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> f64 {
        let t = (self.center - ray.origin()).dot(self.normal) / self.normal.dot(ray.direction());
        ray_t.clamp(t)
    }

    pub fn normal(&self, _point: DVec3) -> DVec3 {
        self.normal
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
