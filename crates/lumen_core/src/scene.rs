//! Scene description types for Lumen.
//!
//! These types describe a scene as plain data: camera parameters, point
//! lights and primitives with their materials. They carry no derived state
//! and can be (de)serialized with serde. Renderers build their own
//! acceleration-ready representation from them.

use lumen_math::DVec3;
use serde::{Deserialize, Serialize};

use crate::loader::{LoadResult, SceneError};

/// A Phong material with a mirror term.
///
/// All coefficients are RGB triples. `ior` is carried for future BRDF work
/// and does not take part in lighting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Ambient coefficient
    pub ka: DVec3,

    /// Diffuse coefficient
    pub kd: DVec3,

    /// Specular coefficient
    pub ks: DVec3,

    /// Mirror reflectivity
    pub km: DVec3,

    /// Specular exponent
    pub shininess: f64,

    /// Index of refraction
    pub ior: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: DVec3::splat(0.1),
            kd: DVec3::splat(0.5),
            ks: DVec3::ZERO,
            km: DVec3::ZERO,
            shininess: 10.0,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Create a material from its four coefficients and specular exponent.
    pub fn new(ka: DVec3, kd: DVec3, ks: DVec3, km: DVec3, shininess: f64) -> Self {
        Self {
            ka,
            kd,
            ks,
            km,
            shininess,
            ior: 1.0,
        }
    }

    /// A perfect mirror with no local shading.
    pub fn mirror() -> Self {
        Self::new(DVec3::ZERO, DVec3::ZERO, DVec3::ZERO, DVec3::ONE, 0.0)
    }

    /// Check if this material reflects enough light to warrant a mirror ray.
    pub fn is_reflective(&self, epsilon: f64) -> bool {
        self.km.length_squared() >= epsilon
    }

    fn is_finite(&self) -> bool {
        self.ka.is_finite()
            && self.kd.is_finite()
            && self.ks.is_finite()
            && self.km.is_finite()
            && self.shininess.is_finite()
            && self.ior.is_finite()
    }
}

/// A point light with no attenuation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: DVec3,
    pub color: DVec3,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: DVec3, color: DVec3) -> Self {
        Self { position, color }
    }
}

/// A primitive and its material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    /// Infinite plane through `center` with the given normal.
    Plane {
        center: DVec3,
        normal: DVec3,
        #[serde(default)]
        material: Material,
    },

    Sphere {
        center: DVec3,
        radius: f64,
        #[serde(default)]
        material: Material,
    },

    /// Triangle; vertex order decides the normal's orientation.
    Triangle {
        v0: DVec3,
        v1: DVec3,
        v2: DVec3,
        #[serde(default)]
        material: Material,
    },

    /// Torus around the z axis through `center`.
    Torus {
        center: DVec3,
        major_radius: f64,
        minor_radius: f64,
        #[serde(default)]
        material: Material,
    },
}

impl ShapeDescription {
    /// Short name of the primitive kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeDescription::Plane { .. } => "plane",
            ShapeDescription::Sphere { .. } => "sphere",
            ShapeDescription::Triangle { .. } => "triangle",
            ShapeDescription::Torus { .. } => "torus",
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            ShapeDescription::Plane { material, .. }
            | ShapeDescription::Sphere { material, .. }
            | ShapeDescription::Triangle { material, .. }
            | ShapeDescription::Torus { material, .. } => material,
        }
    }

    fn validate(&self, index: usize) -> LoadResult<()> {
        let invalid = |reason: &str| {
            Err(SceneError::Invalid(format!(
                "shape {} ({}): {}",
                index,
                self.kind(),
                reason
            )))
        };

        if !self.material().is_finite() {
            return invalid("material has non-finite coefficients");
        }

        match *self {
            ShapeDescription::Plane { center, normal, .. } => {
                if !center.is_finite() || !normal.is_finite() {
                    return invalid("non-finite geometry");
                }
                if normal.length_squared() == 0.0 {
                    return invalid("normal has zero length");
                }
            }
            ShapeDescription::Sphere { center, radius, .. } => {
                if !center.is_finite() || !radius.is_finite() {
                    return invalid("non-finite geometry");
                }
                if radius <= 0.0 {
                    return invalid("radius must be positive");
                }
            }
            ShapeDescription::Triangle { v0, v1, v2, .. } => {
                if !v0.is_finite() || !v1.is_finite() || !v2.is_finite() {
                    return invalid("non-finite geometry");
                }
            }
            ShapeDescription::Torus {
                center,
                major_radius,
                minor_radius,
                ..
            } => {
                if !center.is_finite() || !major_radius.is_finite() || !minor_radius.is_finite() {
                    return invalid("non-finite geometry");
                }
                if major_radius <= 0.0 || minor_radius <= 0.0 {
                    return invalid("radii must be positive");
                }
            }
        }

        Ok(())
    }
}

/// Camera placement and viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub eye: DVec3,
    pub look_at: DVec3,
    pub up: DVec3,

    /// Vertical field of view in degrees
    pub fov_y: f64,

    /// Distance from the eye to the focal plane
    #[serde(default = "default_focal_distance")]
    pub focal_distance: f64,

    /// Viewport width in pixels
    pub width: u32,

    /// Viewport height in pixels
    pub height: u32,
}

fn default_focal_distance() -> f64 {
    1.0
}

impl CameraDescription {
    fn validate(&self) -> LoadResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::Invalid(format!(
                "camera viewport {}x{} is empty",
                self.width, self.height
            )));
        }
        if !(self.eye.is_finite() && self.look_at.is_finite() && self.up.is_finite()) {
            return Err(SceneError::Invalid("camera has non-finite vectors".into()));
        }
        if !(self.fov_y > 0.0 && self.fov_y < 180.0) {
            return Err(SceneError::Invalid(format!(
                "camera field of view {} is outside (0, 180)",
                self.fov_y
            )));
        }
        if !(self.focal_distance > 0.0 && self.focal_distance.is_finite()) {
            return Err(SceneError::Invalid(format!(
                "camera focal distance {} must be positive",
                self.focal_distance
            )));
        }
        Ok(())
    }
}

/// A complete scene: camera, lights and shapes in insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,

    #[serde(default)]
    pub lights: Vec<Light>,

    pub shapes: Vec<ShapeDescription>,
}

impl SceneDescription {
    /// Check the description for values the renderer cannot use.
    pub fn validate(&self) -> LoadResult<()> {
        self.camera.validate()?;

        if self.shapes.is_empty() {
            return Err(SceneError::NoShapes);
        }

        for (index, shape) in self.shapes.iter().enumerate() {
            shape.validate(index)?;
        }

        for (index, light) in self.lights.iter().enumerate() {
            if !light.position.is_finite() || !light.color.is_finite() {
                return Err(SceneError::Invalid(format!(
                    "light {} has non-finite values",
                    index
                )));
            }
        }

        Ok(())
    }

    /// The built-in showcase scene.
    ///
    /// A green and a red sphere in front of two large mirror spheres, a
    /// floor and a tilted back wall, a blue triangle and a reflective torus
    /// ringing the green sphere, lit by two white lights.
    pub fn demo() -> Self {
        let camera = CameraDescription {
            eye: DVec3::new(0.0, 0.0, 6.0),
            look_at: DVec3::new(0.0, 0.0, 1.0),
            up: DVec3::new(0.25, 0.85, 0.5),
            fov_y: 65.0,
            focal_distance: 1.0,
            width: 1024,
            height: 768,
        };

        let lights = vec![
            Light::new(DVec3::new(0.0, 3.0, -2.0), DVec3::splat(0.2)),
            Light::new(DVec3::new(-2.0, 1.0, 4.0), DVec3::splat(0.5)),
        ];

        let shapes = vec![
            ShapeDescription::Sphere {
                center: DVec3::new(-1.0, -0.7, 3.0),
                radius: 0.3,
                material: Material::new(
                    DVec3::splat(0.1),
                    DVec3::new(0.3, 0.6, 0.3),
                    DVec3::ONE,
                    DVec3::new(0.1, 0.4, 0.1),
                    100.0,
                ),
            },
            ShapeDescription::Sphere {
                center: DVec3::new(1.0, -0.5, 3.0),
                radius: 0.5,
                material: Material::new(
                    DVec3::splat(0.1),
                    DVec3::new(1.0, 0.0, 0.0),
                    DVec3::ONE,
                    DVec3::ZERO,
                    10.0,
                ),
            },
            ShapeDescription::Sphere {
                center: DVec3::new(-1.0, 0.0, 0.0),
                radius: 1.0,
                material: Material::mirror(),
            },
            ShapeDescription::Sphere {
                center: DVec3::new(1.0, 0.0, -1.0),
                radius: 1.0,
                material: Material::mirror(),
            },
            ShapeDescription::Plane {
                center: DVec3::new(-1.0, -3.0, 0.0),
                normal: DVec3::Y,
                material: Material::new(DVec3::splat(0.1), DVec3::ONE, DVec3::ZERO, DVec3::ZERO, 0.0),
            },
            ShapeDescription::Plane {
                center: DVec3::new(0.0, 0.0, -3.0),
                normal: DVec3::new(1.0, 0.0, 1.0),
                material: Material::new(DVec3::splat(0.1), DVec3::ONE, DVec3::ZERO, DVec3::ZERO, 0.0),
            },
            ShapeDescription::Triangle {
                v0: DVec3::new(2.0, 0.0, -1.0),
                v1: DVec3::new(2.75, 3.0, -0.5),
                v2: DVec3::new(3.0, 0.5, 1.0),
                material: Material::new(
                    DVec3::splat(0.1),
                    DVec3::new(0.2, 0.2, 1.0),
                    DVec3::ONE,
                    DVec3::ZERO,
                    100.0,
                ),
            },
            ShapeDescription::Torus {
                center: DVec3::new(-1.0, -0.7, 3.0),
                major_radius: 0.5,
                minor_radius: 0.1,
                material: Material::new(
                    DVec3::splat(0.1),
                    DVec3::ZERO,
                    DVec3::ONE,
                    DVec3::splat(0.8),
                    100.0,
                ),
            },
        ];

        Self {
            camera,
            lights,
            shapes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_is_valid() {
        let scene = SceneDescription::demo();
        assert!(scene.validate().is_ok());
        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.shapes.len(), 8);
        assert_eq!(scene.camera.width % 64, 0);
        assert_eq!(scene.camera.height % 64, 0);
    }

    #[test]
    fn test_material_reflectivity() {
        assert!(Material::mirror().is_reflective(1e-6));
        assert!(!Material::default().is_reflective(1e-6));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let mut scene = SceneDescription::demo();
        scene.shapes.push(ShapeDescription::Sphere {
            center: DVec3::ZERO,
            radius: -1.0,
            material: Material::default(),
        });

        match scene.validate() {
            Err(SceneError::Invalid(message)) => assert!(message.contains("shape 8 (sphere)")),
            other => panic!("expected invalid sphere, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_zero_plane_normal() {
        let mut scene = SceneDescription::demo();
        scene.shapes = vec![ShapeDescription::Plane {
            center: DVec3::ZERO,
            normal: DVec3::ZERO,
            material: Material::default(),
        }];

        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_rejects_empty_scene() {
        let mut scene = SceneDescription::demo();
        scene.shapes.clear();

        assert!(matches!(scene.validate(), Err(SceneError::NoShapes)));
    }

    #[test]
    fn test_rejects_bad_camera() {
        let mut scene = SceneDescription::demo();
        scene.camera.fov_y = 180.0;
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));

        let mut scene = SceneDescription::demo();
        scene.camera.height = 0;
        assert!(matches!(scene.validate(), Err(SceneError::Invalid(_))));
    }
}
