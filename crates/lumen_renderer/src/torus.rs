//! Torus primitive.
//!
//! The torus is centred at `center` with its symmetry axis along z, so the
//! ring lies in the plane `z = center.z`. Its implicit surface is
//!
//! ```text
//! f(x, y, z) = (x² + y² + z² + R² - r²)² - 4R²(x² + y²)
//! ```
//!
//! in coordinates relative to the centre. Substituting the ray gives a
//! quartic in the ray parameter, solved with [`Quartic::roots`].

use crate::quartic::{Quartic, QuarticSolverConfig};
use crate::Material;
use lumen_math::{Aabb, DVec3, Interval, Ray};

/// A torus primitive.
#[derive(Debug, Clone)]
pub struct Torus {
    center: DVec3,
    major_radius: f64,
    minor_radius: f64,
    material: Material,
    bbox: Aabb,
    solver: QuarticSolverConfig,
}

impl Torus {
    /// Create a new torus with the default solver settings.
    pub fn new(center: DVec3, major_radius: f64, minor_radius: f64, material: Material) -> Self {
        let extent = DVec3::splat(major_radius.abs() + minor_radius.abs());
        let bbox = Aabb::from_points(center - extent, center + extent);

        Self {
            center,
            major_radius,
            minor_radius,
            material,
            bbox,
            solver: QuarticSolverConfig::default(),
        }
    }

    /// Use custom quartic solver settings.
    pub fn with_solver(mut self, solver: QuarticSolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Coefficients of the monic quartic whose roots are the ray parameters
    /// of the surface crossings. Works for any non-zero direction length.
    pub fn quartic(&self, ray: &Ray) -> Quartic {
        let p = ray.origin() - self.center;
        let d = ray.direction();

        let r2 = self.major_radius * self.major_radius;
        let t = 4.0 * r2;
        let g = t * (d.x * d.x + d.y * d.y);
        let h = 2.0 * t * (p.x * d.x + p.y * d.y);
        let i = t * (p.x * p.x + p.y * p.y);
        let j = d.length_squared();
        let k = 2.0 * d.dot(p);
        let l = p.length_squared() + r2 - self.minor_radius * self.minor_radius;
        let m = 1.0 / (j * j);

        Quartic::new(
            m * (2.0 * j * k),
            m * (2.0 * j * l + k * k - g),
            m * (2.0 * k * l - h),
            m * (l * l - i),
        )
    }

    /// Smallest real root above `ray_t.min`, clamped into `ray_t`.
    ///
    /// Returns `ray_t.max` when no root is near-real or the solver gave up.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> f64 {
        match self.quartic(ray).smallest_real_root_above(ray_t.min, &self.solver) {
            Some(t) => ray_t.clamp(t),
            None => ray_t.max,
        }
    }

    /// Unit normal from the gradient of the implicit function.
    ///
    /// Singular on the z axis through the centre (zero radial distance),
    /// where the result is not finite. No surface point lies there unless the
    /// minor radius exceeds the major radius.
    pub fn normal(&self, point: DVec3) -> DVec3 {
        let p = point - self.center;
        let k = 1.0 - self.major_radius / (p.x * p.x + p.y * p.y).sqrt();

        // Gradient up to a positive factor
        DVec3::new(p.x * k, p.y * k, p.z).normalize()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}
