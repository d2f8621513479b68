use crate::DVec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not normalized by the constructor. Intersection code that
/// assumes unit length documents it; use [`Ray::normalized`] when building
/// camera, shadow or reflection rays.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray whose direction has unit length.
    pub fn normalized(origin: DVec3, direction: DVec3) -> Self {
        Self::new(origin, direction.normalize())
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}
