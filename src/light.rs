//! Lighting types for the shading model.

use crate::colors::ColorRGB;
use crate::math::vec3::Vec3;

/// Specular exponent scale applied to the glossiness map sample.
pub const SPECULAR_SHININESS: f32 = 25.0;

/// Constant ambient term added after the selected shading mode.
pub const AMBIENT: ColorRGB = ColorRGB::new(0.05, 0.05, 0.05);

/// A directional light: all rays parallel, like a distant sun.
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
    /// Multiplier for the diffuse contribution.
    pub intensity: f32,
}

impl DirectionalLight {
    /// Creates a directional light pointing along `direction`.
    /// The direction is normalized automatically.
    pub fn new(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }

    /// The single hardcoded scene light.
    pub fn scene_default() -> Self {
        Self::new(Vec3::new(0.577, -0.577, 0.577), 2.0)
    }

    /// Lambertian cosine term in [0, 1]: how squarely the surface faces the
    /// light.
    pub fn observed_area(&self, normal: Vec3) -> f32 {
        normal.dot(-self.direction).max(0.0)
    }
}
