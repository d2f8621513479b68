//! Pinhole camera for primary ray generation.

use crate::error::{RenderError, RenderResult};
use lumen_core::CameraDescription;
use lumen_math::{DVec3, Ray};

/// Settings collected before the camera basis is derived.
#[derive(Debug, Clone, Copy)]
pub struct CameraBuilder {
    width: u32,
    height: u32,

    // Camera positioning
    eye: DVec3,
    look_at: DVec3,
    up: DVec3,

    // Lens settings
    fov_y: f64,          // Vertical field of view in degrees
    focal_distance: f64, // Distance from the eye to the focal plane
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            eye: DVec3::ZERO,
            look_at: DVec3::NEG_Z,
            up: DVec3::Y,
            fov_y: 90.0,
            focal_distance: 1.0,
        }
    }
}

impl CameraBuilder {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, eye: DVec3, look_at: DVec3, up: DVec3) -> Self {
        self.eye = eye;
        self.look_at = look_at;
        self.up = up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, fov_y: f64, focal_distance: f64) -> Self {
        self.fov_y = fov_y;
        self.focal_distance = focal_distance;
        self
    }

    /// Derive the basis and focal plane.
    ///
    /// Fails on an empty viewport, a field of view outside (0, 180) degrees,
    /// a non-positive focal distance, coincident eye and look-at points, or
    /// an up vector parallel to the view direction.
    pub fn build(self) -> RenderResult<Camera> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidViewport {
                width: self.width,
                height: self.height,
                reason: "viewport is empty".into(),
            });
        }
        if !(self.fov_y > 0.0 && self.fov_y < 180.0) {
            return Err(RenderError::DegenerateCamera(format!(
                "field of view {} is outside (0, 180)",
                self.fov_y
            )));
        }
        if !(self.focal_distance > 0.0 && self.focal_distance.is_finite()) {
            return Err(RenderError::DegenerateCamera(format!(
                "focal distance {} must be positive",
                self.focal_distance
            )));
        }

        let w = (self.look_at - self.eye).try_normalize().ok_or_else(|| {
            RenderError::DegenerateCamera("eye and look-at points coincide".into())
        })?;
        let u = w.cross(self.up).try_normalize().ok_or_else(|| {
            RenderError::DegenerateCamera("up vector is parallel to the view direction".into())
        })?;
        let v = u.cross(w);

        // Focal plane geometry
        let plane_height = 2.0 * self.focal_distance * (self.fov_y.to_radians() / 2.0).tan();
        let pixel_size = plane_height / self.height as f64;
        let plane_width = pixel_size * self.width as f64;

        let plane_center = self.eye + self.focal_distance * w;
        let plane_origin = plane_center - (plane_width / 2.0) * u - (plane_height / 2.0) * v;

        Ok(Camera {
            width: self.width,
            height: self.height,
            eye: self.eye,
            u,
            v,
            w,
            plane_origin,
            plane_width,
            plane_height,
            pixel_size,
        })
    }
}

/// Camera for generating primary rays. Immutable once built.
#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,
    eye: DVec3,
    u: DVec3,
    v: DVec3,
    w: DVec3,
    /// Bottom-left corner of the focal plane
    plane_origin: DVec3,
    plane_width: f64,
    plane_height: f64,
    pixel_size: f64,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// Build the camera a scene file describes.
    pub fn from_description(description: &CameraDescription) -> RenderResult<Self> {
        Self::builder()
            .with_resolution(description.width, description.height)
            .with_position(description.eye, description.look_at, description.up)
            .with_lens(description.fov_y, description.focal_distance)
            .build()
    }

    /// Unit-direction ray from the eye through the centre of pixel `(i, j)`.
    ///
    /// `(0, 0)` is the bottom-left pixel; `i` grows along `u` and `j` along `v`.
    pub fn ray(&self, i: u32, j: u32) -> Ray {
        self.ray_at(i, j, 0.5, 0.5)
    }

    /// Ray through the point `(du, dv)` inside pixel `(i, j)`, with both
    /// offsets in pixel units from the pixel's bottom-left corner.
    pub fn ray_at(&self, i: u32, j: u32, du: f64, dv: f64) -> Ray {
        let target = self.plane_origin
            + (i as f64 + du) * self.pixel_size * self.u
            + (j as f64 + dv) * self.pixel_size * self.v;

        Ray::normalized(self.eye, target - self.eye)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// The orthonormal basis `(u, v, w)`: right, up, forward.
    pub fn basis(&self) -> (DVec3, DVec3, DVec3) {
        (self.u, self.v, self.w)
    }

    /// Focal plane size in world units.
    pub fn plane_size(&self) -> (f64, f64) {
        (self.plane_width, self.plane_height)
    }

    /// Pixel pitch on the focal plane.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }
}
