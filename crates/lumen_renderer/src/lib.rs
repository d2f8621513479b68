//! Lumen Renderer - CPU Whitted ray tracing
//!
//! Renders planes, spheres, triangles and tori with ambient and Phong
//! shading, hard shadows from point lights and recursive mirror reflection.
//! The viewport is split into buckets rendered by a fixed pool of workers.
//!
//! # Example
//!
//! ```ignore
//! use lumen_renderer::{render, save_image, Camera, RenderConfig, Scene};
//!
//! let description = lumen_core::SceneDescription::demo();
//! let config = RenderConfig::default();
//! let scene = Scene::from_description(&description, &config.torus);
//! let camera = Camera::from_description(&description.camera)?;
//!
//! let image = render(&camera, &scene, &config)?;
//! save_image(&image, "demo.png")?;
//! ```

mod bucket;
mod camera;
mod error;
mod material;
mod output;
mod plane;
mod quartic;
mod renderer;
mod scene;
mod shape;
mod sphere;
mod torus;
mod triangle;

pub use bucket::{generate_buckets, render, render_bucket, validate_viewport, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraBuilder};
pub use error::{RenderError, RenderResult};
pub use material::{phong, saturate, Color, Light, Material};
pub use output::{save_image, save_png, save_ppm, write_ppm};
pub use plane::Plane;
pub use quartic::{Quartic, QuarticSolverConfig};
pub use renderer::{color_to_rgb, ray_color, render_pixel, ImageBuffer, RenderConfig};
pub use scene::{Record, Scene};
pub use shape::Shape;
pub use sphere::Sphere;
pub use torus::Torus;
pub use triangle::Triangle;

/// Re-export common math types from lumen_math
pub use lumen_math::{Aabb, DVec3, Interval, Ray};
