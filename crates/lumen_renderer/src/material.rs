//! Phong shading terms.

use lumen_math::DVec3;

pub use lumen_core::{Light, Material};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Diffuse and specular contribution of one unoccluded light.
///
/// `to_light` and `to_eye` are unit vectors from the shaded point; `normal`
/// is the surface normal at that point. The result is already scaled by the
/// light's color. Ambient light is not included.
pub fn phong(material: &Material, light: &Light, normal: DVec3, to_light: DVec3, to_eye: DVec3) -> Color {
    let light_dot_normal = to_light.dot(normal);

    // Mirror of the light direction about the normal
    let reflected = (2.0 * light_dot_normal * normal - to_light).normalize();

    let diffuse = light_dot_normal.max(0.0) * material.kd;
    let specular = reflected.dot(to_eye).max(0.0).powf(material.shininess) * material.ks;

    light.color * (diffuse + specular)
}

/// Clamp every channel to at most 1.0.
#[inline]
pub fn saturate(color: Color) -> Color {
    color.min(Color::ONE)
}
