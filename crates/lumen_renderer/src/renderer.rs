//! Whitted-style ray-color evaluation.
//!
//! Implements:
//! - Ambient plus Phong shading with hard shadows from point lights
//! - Recursive mirror reflection up to a configurable depth
//! - 8-bit conversion into a row-major image buffer

use crate::bucket::BucketResult;
use crate::error::{RenderError, RenderResult};
use crate::material::{phong, saturate};
use crate::quartic::QuarticSolverConfig;
use crate::{Camera, Color, Scene};
use lumen_math::{Interval, Ray};

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Recursion cap for reflection rays
    pub max_depth: u32,
    /// Shadow ray start and reflection origin offset
    pub epsilon: f64,
    /// Reflection is skipped when |km|² is below this
    pub reflectivity_epsilon: f64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Number of worker threads
    pub workers: usize,
    /// Solver settings for tori
    pub torus: QuarticSolverConfig,
    /// Average four sub-pixel rays per pixel
    pub supersample: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            epsilon: 1e-4,
            reflectivity_epsilon: 1e-6,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            torus: QuarticSolverConfig::default(),
            supersample: false,
        }
    }
}

impl RenderConfig {
    /// Reject settings that cannot drive a render.
    pub fn validate(&self) -> RenderResult<()> {
        if self.workers == 0 {
            return Err(RenderError::InvalidConfig("workers must be at least 1".into()));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidConfig("bucket size must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig("max depth must be at least 1".into()));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(RenderError::InvalidConfig(format!(
                "epsilon {} must be finite and positive",
                self.epsilon
            )));
        }
        if !(self.reflectivity_epsilon >= 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "reflectivity epsilon {} must be non-negative",
                self.reflectivity_epsilon
            )));
        }
        Ok(())
    }
}

/// Compute the color seen along `ray` within `ray_t`.
///
/// Rays past `config.max_depth` and rays that hit nothing are black. A hit
/// starts from the material's ambient term, adds the Phong contribution of
/// every light that is not shadowed, then adds the mirror reflection scaled
/// by `km`. The result is clamped to at most 1.0 per channel.
pub fn ray_color(scene: &Scene, ray: &Ray, ray_t: Interval, depth: u32, config: &RenderConfig) -> Color {
    if depth >= config.max_depth {
        return Color::ZERO;
    }

    let Some(rec) = scene.find_intersection(ray, ray_t) else {
        return Color::ZERO;
    };

    let material = rec.material;
    let mut color = material.ka;
    let to_eye = (ray.origin() - rec.point).normalize();

    for light in scene.lights() {
        if scene.is_occluded(rec.point, light, config.epsilon) {
            continue;
        }

        let to_light = (light.position - rec.point).normalize();
        color += phong(material, light, rec.normal, to_light, to_eye);
    }

    if !material.is_reflective(config.reflectivity_epsilon) {
        return saturate(color);
    }

    let d = ray.direction();
    let reflected_dir = (d - 2.0 * d.dot(rec.normal) * rec.normal).normalize();
    let reflected_ray = Ray::new(rec.point + config.epsilon * reflected_dir, reflected_dir);
    let reflected = ray_color(
        scene,
        &reflected_ray,
        Interval::new(0.0, f64::INFINITY),
        depth + 1,
        config,
    );

    saturate(color + material.km * reflected)
}

/// Sub-pixel offsets averaged when supersampling.
const SUPERSAMPLE_OFFSETS: [(f64, f64); 4] = [(0.25, 0.25), (0.25, 0.75), (0.75, 0.25), (0.75, 0.75)];

/// Color of viewport pixel `(i, j)`, with `(0, 0)` at the bottom left.
///
/// One ray through the pixel centre, or the mean of four sub-pixel rays when
/// `config.supersample` is set.
pub fn render_pixel(camera: &Camera, scene: &Scene, i: u32, j: u32, config: &RenderConfig) -> Color {
    let primary = Interval::new(0.0, f64::INFINITY);

    if !config.supersample {
        return ray_color(scene, &camera.ray(i, j), primary, 0, config);
    }

    let sum: Color = SUPERSAMPLE_OFFSETS
        .iter()
        .map(|&(du, dv)| ray_color(scene, &camera.ray_at(i, j, du, dv), primary, 0, config))
        .sum();
    sum / SUPERSAMPLE_OFFSETS.len() as f64
}

/// Convert a color to 8-bit RGB.
///
/// Channels saturate at 255; negative and NaN channels become 0.
#[inline]
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f64| (255.0 * c).clamp(0.0, 255.0) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Row-major 8-bit RGB image. Row 0 is the top of the picture.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        let row_len = bucket.width as usize;

        for (local_y, row) in result.pixels.chunks_exact(row_len).enumerate() {
            let start = self.index(bucket.x, bucket.y + local_y as u32);
            self.pixels[start..start + row_len].copy_from_slice(row);
        }
    }

    /// Flatten to RGB bytes (for saving).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bucket, Light, Material, Plane, Sphere, Triangle};
    use lumen_math::DVec3;

    fn matte(ka: f64, kd: f64) -> Material {
        Material::new(Color::splat(ka), Color::splat(kd), Color::ZERO, Color::ZERO, 10.0)
    }

    fn down_ray() -> Ray {
        Ray::new(DVec3::ZERO, DVec3::NEG_Y)
    }

    fn primary() -> Interval {
        Interval::new(0.0, f64::INFINITY)
    }

    #[test]
    fn test_miss_is_black() {
        let scene = Scene::new();
        let c = ray_color(&scene, &down_ray(), primary(), 0, &RenderConfig::default());
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_ambient_only() {
        let mut scene = Scene::new();
        scene.add_shape(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, matte(0.3, 0.9)));

        let c = ray_color(&scene, &down_ray(), primary(), 0, &RenderConfig::default());
        assert!((c - Color::splat(0.3)).length() < 1e-12);
    }

    #[test]
    fn test_lit_floor() {
        let mut scene = Scene::new();
        scene.add_shape(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, matte(0.0, 1.0)));
        scene.add_light(Light::new(DVec3::new(0.0, 5.0, 0.0), Color::splat(0.5)));

        let c = ray_color(&scene, &down_ray(), primary(), 0, &RenderConfig::default());
        assert!((c - Color::splat(0.5)).length() < 1e-9);
    }

    #[test]
    fn test_occluder_removes_light() {
        let mut scene = Scene::new();
        scene.add_shape(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, matte(0.0, 1.0)));
        scene.add_shape(Sphere::new(DVec3::new(0.0, 2.0, 0.0), 0.5, matte(0.0, 1.0)));
        scene.add_light(Light::new(DVec3::new(0.0, 5.0, 0.0), Color::splat(0.5)));

        let c = ray_color(&scene, &down_ray(), primary(), 0, &RenderConfig::default());
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_mirror_reflects_sphere() {
        let mirror = Material::new(Color::ZERO, Color::ZERO, Color::ZERO, Color::splat(0.5), 10.0);
        let mut scene = Scene::new();
        scene.add_shape(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, mirror));
        scene.add_shape(Sphere::new(DVec3::new(0.0, 3.0, 0.0), 1.0, matte(0.4, 0.0)));

        let c = ray_color(&scene, &down_ray(), primary(), 0, &RenderConfig::default());
        assert!((c - Color::splat(0.2)).length() < 1e-12);
    }

    #[test]
    fn test_facing_mirrors_are_black_and_finite() {
        let mut scene = Scene::new();
        scene.add_shape(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, Material::mirror()));
        scene.add_shape(Plane::new(DVec3::new(0.0, 1.0, 0.0), DVec3::NEG_Y, Material::mirror()));

        let c = ray_color(&scene, &down_ray(), primary(), 0, &RenderConfig::default());
        assert!(c.is_finite());
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_depth_limit_is_black() {
        let mut scene = Scene::new();
        scene.add_shape(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, matte(0.3, 0.0)));
        let config = RenderConfig::default();

        let c = ray_color(&scene, &down_ray(), primary(), config.max_depth, &config);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_result_is_saturated() {
        let mut scene = Scene::new();
        scene.add_shape(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, matte(2.0, 0.0)));

        let c = ray_color(&scene, &down_ray(), primary(), 0, &RenderConfig::default());
        assert_eq!(c, Color::ONE);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.5, 2.0, -1.0)), [127, 255, 0]);
        assert_eq!(color_to_rgb(Color::new(f64::NAN, 0.0, 0.0)), [0, 0, 0]);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());

        let config = RenderConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        let config = RenderConfig {
            bucket_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        let config = RenderConfig {
            epsilon: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RenderConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        let config = RenderConfig {
            epsilon: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_supersampling_softens_hard_edge() {
        // Bright half-plane x <= 0 at z = 0; the middle column straddles its
        // edge with the pixel centre just on the empty side
        let camera = Camera::builder()
            .with_resolution(3, 3)
            .with_position(DVec3::new(0.01, 0.0, 5.0), DVec3::new(0.01, 0.0, 0.0), DVec3::Y)
            .with_lens(40.0, 1.0)
            .build()
            .unwrap();
        let mut scene = Scene::new();
        scene.add_shape(Triangle::new(
            DVec3::new(0.0, -100.0, 0.0),
            DVec3::new(0.0, 100.0, 0.0),
            DVec3::new(-100.0, 0.0, 0.0),
            matte(1.0, 0.0),
        ));

        let single = RenderConfig::default();
        assert_eq!(color_to_rgb(render_pixel(&camera, &scene, 1, 1, &single)), [0, 0, 0]);
        assert_eq!(color_to_rgb(render_pixel(&camera, &scene, 0, 1, &single)), [255, 255, 255]);

        let config = RenderConfig {
            supersample: true,
            ..Default::default()
        };
        assert_eq!(color_to_rgb(render_pixel(&camera, &scene, 1, 1, &config)), [127, 127, 127]);
        assert_eq!(color_to_rgb(render_pixel(&camera, &scene, 0, 1, &config)), [255, 255, 255]);
        assert_eq!(color_to_rgb(render_pixel(&camera, &scene, 2, 1, &config)), [0, 0, 0]);
    }

    #[test]
    fn test_write_bucket() {
        let mut image = ImageBuffer::new(4, 4);
        let bucket = Bucket::new(2, 2, 2, 2, 0);
        let pixels = vec![[1, 1, 1], [2, 2, 2], [3, 3, 3], [4, 4, 4]];
        image.write_bucket(&BucketResult::new(bucket, pixels));

        assert_eq!(image.get(2, 2), [1, 1, 1]);
        assert_eq!(image.get(3, 2), [2, 2, 2]);
        assert_eq!(image.get(2, 3), [3, 3, 3]);
        assert_eq!(image.get(3, 3), [4, 4, 4]);
        assert_eq!(image.get(1, 1), [0, 0, 0]);
        assert_eq!(image.to_rgb_bytes().len(), 4 * 4 * 3);
    }
}
