//! The closed set of primitives a scene can hold.

use crate::quartic::QuarticSolverConfig;
use crate::{Material, Plane, Sphere, Torus, Triangle};
use lumen_core::ShapeDescription;
use lumen_math::{Aabb, DVec3, Interval, Ray};

/// A primitive with its material and bounding box.
///
/// Every variant reports intersections the same way: `intersect` returns a
/// ray parameter inside `ray_t`, and `ray_t.max` means "nothing closer than
/// the current bound".
#[derive(Debug, Clone)]
pub enum Shape {
    Plane(Plane),
    Sphere(Sphere),
    Triangle(Triangle),
    Torus(Torus),
}

impl Shape {
    /// Build a shape from its description. Tori use `solver`.
    pub fn from_description(description: &ShapeDescription, solver: &QuarticSolverConfig) -> Self {
        match *description {
            ShapeDescription::Plane {
                center,
                normal,
                material,
            } => Plane::new(center, normal, material).into(),
            ShapeDescription::Sphere {
                center,
                radius,
                material,
            } => Sphere::new(center, radius, material).into(),
            ShapeDescription::Triangle { v0, v1, v2, material } => Triangle::new(v0, v1, v2, material).into(),
            ShapeDescription::Torus {
                center,
                major_radius,
                minor_radius,
                material,
            } => Torus::new(center, major_radius, minor_radius, material)
                .with_solver(*solver)
                .into(),
        }
    }

    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> f64 {
        match self {
            Shape::Plane(plane) => plane.intersect(ray, ray_t),
            Shape::Sphere(sphere) => sphere.intersect(ray, ray_t),
            Shape::Triangle(triangle) => triangle.intersect(ray, ray_t),
            Shape::Torus(torus) => torus.intersect(ray, ray_t),
        }
    }

    pub fn normal(&self, point: DVec3) -> DVec3 {
        match self {
            Shape::Plane(plane) => plane.normal(point),
            Shape::Sphere(sphere) => sphere.normal(point),
            Shape::Triangle(triangle) => triangle.normal(point),
            Shape::Torus(torus) => torus.normal(point),
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            Shape::Plane(plane) => plane.bounding_box(),
            Shape::Sphere(sphere) => sphere.bounding_box(),
            Shape::Triangle(triangle) => triangle.bounding_box(),
            Shape::Torus(torus) => torus.bounding_box(),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Shape::Plane(plane) => plane.material(),
            Shape::Sphere(sphere) => sphere.material(),
            Shape::Triangle(triangle) => triangle.material(),
            Shape::Torus(torus) => torus.material(),
        }
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Torus> for Shape {
    fn from(torus: Torus) -> Self {
        Shape::Torus(torus)
    }
}
