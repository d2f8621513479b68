//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that a fixed pool of rayon workers
//! renders independently. Workers pull buckets from a shared stack, render
//! them into a private buffer without holding any lock, and then copy the
//! result into the shared image.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::error::{RenderError, RenderResult};
use crate::renderer::{color_to_rgb, render_pixel};
use crate::{Camera, ImageBuffer, RenderConfig, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner (row 0 is the top)
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets at the right and bottom edges are clipped when the image is not
/// a multiple of `bucket_size`.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center. Ties keep grid order.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket.
///
/// Pixels come back in row-major order within the bucket, top row first.
/// Image row `y` is geometric row `camera.height() - 1 - y`.
pub fn render_bucket(bucket: &Bucket, camera: &Camera, scene: &Scene, config: &RenderConfig) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        let j = camera.height() - 1 - (bucket.y + local_y);
        for local_x in 0..bucket.width {
            let i = bucket.x + local_x;
            let color = render_pixel(camera, scene, i, j, config);
            pixels.push(color_to_rgb(color));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<[u8; 3]>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<[u8; 3]>) -> Self {
        Self { bucket, pixels }
    }
}

/// Check that the viewport tiles exactly into buckets.
pub fn validate_viewport(width: u32, height: u32, bucket_size: u32) -> RenderResult<()> {
    let reason = if width == 0 || height == 0 {
        Some("viewport is empty".to_string())
    } else if bucket_size == 0 {
        Some("bucket size is zero".to_string())
    } else if width % bucket_size != 0 || height % bucket_size != 0 {
        Some(format!("dimensions must be multiples of the bucket size {}", bucket_size))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RenderError::InvalidViewport { width, height, reason }),
        None => Ok(()),
    }
}

/// Render the whole viewport with `config.workers` threads.
///
/// The configuration and viewport are checked before any work starts, so
/// the call either returns a complete image or an error. Every bucket is
/// taken from the shared stack exactly once and owns a disjoint region of
/// the image.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;
    validate_viewport(camera.width(), camera.height(), config.bucket_size)?;

    let mut buckets = generate_buckets(camera.width(), camera.height(), config.bucket_size);
    let total = buckets.len();

    // Workers pop from the back; reversing puts the centre bucket there
    buckets.reverse();
    let queue = Mutex::new(buckets);
    let image = Mutex::new(ImageBuffer::new(camera.width(), camera.height()));
    let finished = AtomicUsize::new(0);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.workers).build()?;

    log::info!(
        "Rendering {}x{} in {} buckets of {} px with {} workers",
        camera.width(),
        camera.height(),
        total,
        config.bucket_size,
        config.workers
    );
    let start = Instant::now();

    pool.scope(|s| {
        for _ in 0..config.workers {
            s.spawn(|_| loop {
                let next = queue.lock().unwrap_or_else(PoisonError::into_inner).pop();
                let Some(bucket) = next else {
                    break;
                };

                let result = render_bucket(&bucket, camera, scene, config);
                image
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .write_bucket(&result);

                let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
                log::debug!("Bucket {} done ({}/{})", bucket.index, done, total);
            });
        }
    });

    log::info!("Rendered {} buckets in {:?}", total, start.elapsed());

    Ok(image.into_inner().unwrap_or_else(PoisonError::into_inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Material, Sphere};
    use lumen_math::DVec3;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);

        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
    }

    #[test]
    fn test_buckets_cover_image_once() {
        let (width, height) = (256, 128);
        let mut covered = vec![0u8; (width * height) as usize];

        for bucket in generate_buckets(width, height, 64) {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    covered[(y * width + x) as usize] += 1;
                }
            }
        }

        assert!(covered.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_validate_viewport() {
        assert!(validate_viewport(128, 64, 64).is_ok());
        assert!(validate_viewport(100, 64, 64).is_err());
        assert!(validate_viewport(0, 64, 64).is_err());
        assert!(validate_viewport(64, 64, 0).is_err());
    }

    fn sphere_scene() -> Scene {
        let material = Material::new(
            DVec3::splat(0.1),
            DVec3::new(0.3, 0.6, 0.3),
            DVec3::ONE,
            DVec3::ZERO,
            100.0,
        );
        let mut scene = Scene::new();
        scene.add_shape(Sphere::new(DVec3::ZERO, 1.0, material));
        scene.add_light(Light::new(DVec3::new(0.0, 3.0, -2.0), DVec3::splat(0.2)));
        scene
    }

    fn sphere_camera(width: u32, height: u32) -> Camera {
        Camera::builder()
            .with_resolution(width, height)
            .with_position(DVec3::new(0.0, 0.0, 6.0), DVec3::new(0.0, 0.0, 1.0), DVec3::Y)
            .with_lens(65.0, 1.0)
            .build()
            .unwrap()
    }

    fn config(workers: usize) -> RenderConfig {
        RenderConfig {
            workers,
            bucket_size: 16,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_sphere() {
        let _ = env_logger::builder().is_test(true).try_init();

        let camera = sphere_camera(64, 64);
        let image = render(&camera, &sphere_scene(), &config(4)).unwrap();

        assert_eq!(image.pixels.len(), 64 * 64);
        assert_ne!(image.get(32, 32), [0, 0, 0]);
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(image.get(x, y), [0, 0, 0], "corner ({}, {})", x, y);
        }
    }

    #[test]
    fn test_render_with_default_bucket_size() {
        let defaults = RenderConfig {
            workers: 2,
            ..Default::default()
        };
        assert_eq!(defaults.bucket_size, DEFAULT_BUCKET_SIZE);

        let camera = sphere_camera(64, 64);
        let image = render(&camera, &sphere_scene(), &defaults).unwrap();

        assert_eq!(image.pixels.len(), 64 * 64);
        assert_ne!(image.get(32, 32), [0, 0, 0]);
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(image.get(x, y), [0, 0, 0], "corner ({}, {})", x, y);
        }
        assert_eq!(image, render(&camera, &sphere_scene(), &config(4)).unwrap());
    }

    #[test]
    fn test_render_is_deterministic() {
        let camera = sphere_camera(64, 32);
        let scene = sphere_scene();

        let a = render(&camera, &scene, &config(3)).unwrap();
        let b = render(&camera, &scene, &config(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_bucket_flips_rows() {
        let camera = sphere_camera(32, 32);
        let scene = sphere_scene();
        let cfg = config(1);

        let bucket = Bucket::new(0, 0, 32, 32, 0);
        let result = render_bucket(&bucket, &camera, &scene, &cfg);

        // Top-left image pixel is geometric pixel (0, height - 1)
        let expected = color_to_rgb(render_pixel(&camera, &scene, 0, 31, &cfg));
        assert_eq!(result.pixels[0], expected);
        assert_eq!(result.pixels.len(), 32 * 32);
    }

    #[test]
    fn test_render_rejects_bad_setup() {
        let scene = sphere_scene();

        let uneven = sphere_camera(60, 64);
        assert!(matches!(
            render(&uneven, &scene, &config(2)),
            Err(RenderError::InvalidViewport { .. })
        ));

        let camera = sphere_camera(64, 64);
        assert!(matches!(
            render(&camera, &scene, &config(0)),
            Err(RenderError::InvalidConfig(_))
        ));
    }
}
