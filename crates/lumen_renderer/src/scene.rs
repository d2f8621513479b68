//! Scene container and nearest-hit search.

use crate::quartic::QuarticSolverConfig;
use crate::{Light, Material, Shape};
use lumen_core::SceneDescription;
use lumen_math::{Aabb, DVec3, Interval, Ray};

/// Record of the nearest ray-shape intersection.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Material of the shape that was hit
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub point: DVec3,
    /// Surface normal at the point, as reported by the shape
    pub normal: DVec3,
}

/// Shapes and point lights, in insertion order.
///
/// A scene is built once and then shared read-only by all render workers.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from a description; tori use `solver`.
    pub fn from_description(description: &SceneDescription, solver: &QuarticSolverConfig) -> Self {
        let mut scene = Scene::new();
        for shape in &description.shapes {
            scene.add_shape(Shape::from_description(shape, solver));
        }
        for light in &description.lights {
            scene.add_light(*light);
        }

        log::debug!(
            "Built scene with {} shapes and {} lights",
            scene.shapes.len(),
            scene.lights.len()
        );
        scene
    }

    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Box around all bounded shapes. Unbounded shapes (planes) are skipped;
    /// returns [`Aabb::EMPTY`] when nothing is bounded.
    pub fn bounding_box(&self) -> Aabb {
        self.shapes
            .iter()
            .map(Shape::bounding_box)
            .filter(Aabb::is_finite)
            .fold(Aabb::EMPTY, |acc, bbox| Aabb::surrounding(&acc, &bbox))
    }

    /// Find the nearest intersection strictly inside `ray_t`.
    ///
    /// Each shape is first tested against its bounding box, then asked for
    /// its exact parameter. A candidate replaces the running best only when
    /// `ray_t.min < t < best`, so on exact ties the earlier shape wins. The
    /// search misses when no shape improved on `ray_t.max`.
    pub fn find_intersection(&self, ray: &Ray, ray_t: Interval) -> Option<Record<'_>> {
        let mut best = ray_t.max;
        let mut nearest: Option<&Shape> = None;

        for shape in &self.shapes {
            if !shape.bounding_box().hit(ray, ray_t) {
                continue;
            }

            let t = shape.intersect(ray, ray_t);
            if t > ray_t.min && t < best {
                best = t;
                nearest = Some(shape);
            }
        }

        if best == ray_t.max {
            return None;
        }

        nearest.map(|shape| {
            let point = ray.at(best);
            Record {
                material: shape.material(),
                t: best,
                point,
                normal: shape.normal(point),
            }
        })
    }

    /// True when any shape blocks the segment from `point` to `light`.
    ///
    /// The search starts `epsilon` along the segment so the surface the
    /// point lies on does not shadow itself.
    pub fn is_occluded(&self, point: DVec3, light: &Light, epsilon: f64) -> bool {
        let to_light = light.position - point;
        let distance = to_light.length();
        let shadow_ray = Ray::new(point, to_light / distance);

        self.find_intersection(&shadow_ray, Interval::new(epsilon, distance))
            .is_some()
    }
}
