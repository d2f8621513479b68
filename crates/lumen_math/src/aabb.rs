use crate::{DVec3, Interval, Ray};

/// Axis-aligned bounding box used as a cheap reject before exact intersection.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// The default box is [`Aabb::UNIVERSE`], which every ray passes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: DVec3, b: DVec3) -> Self {
        let lo = a.min(b);
        let hi = a.max(b);
        Self::new(
            Interval::new(lo.x, hi.x),
            Interval::new(lo.y, hi.y),
            Interval::new(lo.z, hi.z),
        )
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// The minimum corner.
    pub fn min(&self) -> DVec3 {
        DVec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// The maximum corner.
    pub fn max(&self) -> DVec3 {
        DVec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// True when every axis has a finite extent.
    pub fn is_finite(&self) -> bool {
        self.min().is_finite() && self.max().is_finite()
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Test if a ray can hit this AABB within the given parameter interval.
    ///
    /// Slab method. Never rejects a ray that reaches the box inside `ray_t`;
    /// it may accept rays that miss the primitive inside the box. A zero
    /// direction component yields infinite slab bounds, and the NaN produced
    /// by a ray lying exactly on a slab plane is absorbed by `max`/`min`.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];
            let origin = r.origin[axis];

            let mut t0 = (slab.min - origin) * adinv;
            let mut t1 = (slab.max - origin) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Pad intervals to avoid zero-width AABBs (flat triangles).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::UNIVERSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(DVec3::new(10.0, 0.0, 10.0), DVec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min(), DVec3::ZERO);
        assert_eq!(aabb.max(), DVec3::splat(10.0));
    }

    #[test]
    fn test_aabb_pads_flat_axis() {
        let aabb = Aabb::from_points(DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));

        assert!(aabb.z.size() > 0.0);
        assert!(aabb.z.contains(0.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(DVec3::ZERO, DVec3::splat(5.0));
        let box2 = Aabb::from_points(DVec3::splat(3.0), DVec3::splat(10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min(), DVec3::ZERO);
        assert_eq!(surrounding.max(), DVec3::splat(10.0));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(DVec3::splat(-1.0), DVec3::splat(1.0));
        let window = Interval::new(0.0, 100.0);

        // Ray pointing at center
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        assert!(aabb.hit(&ray, window));

        // Ray pointing away
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::NEG_Z);
        assert!(!aabb.hit(&ray, window));

        // Ray missing the box
        let ray = Ray::new(DVec3::new(10.0, 0.0, 0.0), DVec3::Z);
        assert!(!aabb.hit(&ray, window));

        // Box lies beyond the window
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_hit_axis_parallel_on_boundary() {
        let aabb = Aabb::from_points(DVec3::splat(-1.0), DVec3::splat(1.0));

        // Origin lies exactly on the x = 1 slab plane, direction has no x component
        let ray = Ray::new(DVec3::new(1.0, 0.0, -5.0), DVec3::Z);
        assert!(aabb.hit(&ray, Interval::new(0.0, f64::INFINITY)));
    }

    #[test]
    fn test_universe_always_hit() {
        let ray = Ray::new(DVec3::new(3.0, -2.0, 1.0), DVec3::new(0.0, 1.0, 0.0));

        assert!(Aabb::UNIVERSE.hit(&ray, Interval::new(0.0, f64::INFINITY)));
        assert!(Aabb::default().hit(&ray, Interval::new(1e-4, 2.0)));
    }
}
