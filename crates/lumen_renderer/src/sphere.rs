//! Sphere primitive for ray tracing.

use crate::Material;
use lumen_math::{Aabb, DVec3, Interval, Ray};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Material,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// `radius` must be positive. Scene descriptions are validated before
    /// shapes are built, so a non-positive radius never reaches this point
    /// from a scene file.
    pub fn new(center: DVec3, radius: f64, material: Material) -> Self {
        let rvec = DVec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameter of the nearer surface crossing, clamped into `ray_t`.
    ///
    /// Half-angle form of the quadratic; the ray direction must have unit
    /// length. A ray starting inside the sphere has a negative near root,
    /// which clamps to `ray_t.min`, so the far side is not reported.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> f64 {
        let oc = ray.origin() - self.center;
        let b = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return ray_t.max;
        }

        if discriminant == 0.0 {
            return ray_t.clamp(-b);
        }

        let sqrtd = discriminant.sqrt();
        ray_t.clamp(-b - sqrtd)
    }

    /// Outward unit normal.
    pub fn normal(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
