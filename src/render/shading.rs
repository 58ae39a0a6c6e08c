//! Per-pixel shading: normal mapping plus a diffuse/specular lighting model.
//!
//! Each shading mode is a pure function from fragment to color; mode
//! selection is a match on the [`ShadingMode`] enum, not runtime
//! polymorphism.

use std::f32::consts::PI;

use crate::colors::ColorRGB;
use crate::engine::ShadingMode;
use crate::light::{DirectionalLight, AMBIENT, SPECULAR_SHININESS};
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::MaterialSet;

/// One rasterized fragment's interpolated attributes, ready for shading.
///
/// `normal` and `tangent` are normalized by the rasterizer after
/// interpolation; `uv` is clamped to [0, 1].
pub struct Fragment {
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub view_direction: Vec3,
}

/// Replaces the geometric normal with the normal-map sample, transformed
/// from tangent space into world space.
fn apply_normal_map(fragment: &Fragment, materials: &MaterialSet) -> Vec3 {
    let binormal = fragment.normal.cross(fragment.tangent);
    let tangent_space = Mat4::from_basis(fragment.tangent, binormal, fragment.normal, Vec3::ZERO);

    // Decode the [0,1] color range back to a [-1,1] direction
    let sample = materials.normal_map.sample(fragment.uv);
    let tangent_normal = Vec3::new(sample.r, sample.g, sample.b) * 2.0 - Vec3::ONE;

    tangent_space.transform_vector(tangent_normal).normalize()
}

/// Computes the final color for a fragment under the selected shading mode.
pub fn shade_pixel(
    fragment: &Fragment,
    materials: &MaterialSet,
    light: &DirectionalLight,
    mode: ShadingMode,
    use_normal_map: bool,
) -> ColorRGB {
    let normal = if use_normal_map {
        apply_normal_map(fragment, materials)
    } else {
        fragment.normal
    };

    let observed_area = light.observed_area(normal);

    let diffuse = materials.diffuse.sample(fragment.uv);

    // Specular: reflect the light about the normal, compare with the view ray
    let reflection = (-light.direction).reflect(normal);
    let cos_alpha = reflection.dot(fragment.view_direction).max(0.0);
    let exponent = SPECULAR_SHININESS * materials.glossiness.sample(fragment.uv).r;
    let specular = materials.specular.sample(fragment.uv) * cos_alpha.powf(exponent);

    let shaded = match mode {
        ShadingMode::ObservedArea => ColorRGB::splat(observed_area),
        ShadingMode::Diffuse => diffuse * (light.intensity * observed_area) / PI,
        ShadingMode::Specular => specular,
        ShadingMode::Combined => (diffuse * light.intensity / PI + specular) * observed_area,
    };

    (shaded + AMBIENT).clamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use approx::assert_relative_eq;

    fn lit_fragment(light: &DirectionalLight) -> Fragment {
        Fragment {
            uv: Vec2::new(0.5, 0.5),
            normal: -light.direction,
            tangent: Vec3::RIGHT,
            view_direction: light.direction,
        }
    }

    #[test]
    fn observed_area_mode_is_grayscale_cosine() {
        let light = DirectionalLight::scene_default();
        let materials = MaterialSet::neutral();
        let fragment = lit_fragment(&light);

        let color = shade_pixel(&fragment, &materials, &light, ShadingMode::ObservedArea, false);
        // Fully facing the light: 1.0 plus ambient, clamped
        assert_eq!(color, ColorRGB::WHITE);
    }

    #[test]
    fn diffuse_mode_scales_texture_by_lambert_over_pi() {
        let light = DirectionalLight::scene_default();
        let mut materials = MaterialSet::neutral();
        materials.diffuse = Texture::solid(ColorRGB::new(1.0, 0.0, 0.0));
        let fragment = lit_fragment(&light);

        let color = shade_pixel(&fragment, &materials, &light, ShadingMode::Diffuse, false);
        assert_relative_eq!(color.r, (2.0 / PI + 0.05).min(1.0), epsilon = 1e-2);
        assert_relative_eq!(color.g, 0.05, epsilon = 1e-3);
    }

    #[test]
    fn surface_facing_away_gets_only_ambient() {
        let light = DirectionalLight::scene_default();
        let materials = MaterialSet::neutral();
        let fragment = Fragment {
            uv: Vec2::new(0.5, 0.5),
            normal: light.direction,
            tangent: Vec3::RIGHT,
            view_direction: light.direction,
        };

        let color = shade_pixel(&fragment, &materials, &light, ShadingMode::Combined, false);
        assert_eq!(color, AMBIENT);
    }

    #[test]
    fn flat_normal_map_preserves_the_geometric_normal() {
        let light = DirectionalLight::scene_default();
        let materials = MaterialSet::neutral();
        let fragment = lit_fragment(&light);

        let with_map =
            shade_pixel(&fragment, &materials, &light, ShadingMode::ObservedArea, true);
        let without =
            shade_pixel(&fragment, &materials, &light, ShadingMode::ObservedArea, false);
        let diff = (ColorRGB::from_argb(with_map.to_argb()).r
            - ColorRGB::from_argb(without.to_argb()).r)
            .abs();
        assert!(diff < 2.0 / 255.0);
    }

    #[test]
    fn specular_highlight_peaks_along_the_reflection() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), 2.0);
        let mut materials = MaterialSet::neutral();
        materials.specular = Texture::solid(ColorRGB::WHITE);
        materials.glossiness = Texture::solid(ColorRGB::WHITE);

        // Camera straight above looking down: the view ray (camera to
        // surface) lines up with the reflected light for a mirror hit
        let fragment = Fragment {
            uv: Vec2::new(0.5, 0.5),
            normal: Vec3::UP,
            tangent: Vec3::RIGHT,
            view_direction: Vec3::new(0.0, -1.0, 0.0),
        };
        let peak = shade_pixel(&fragment, &materials, &light, ShadingMode::Specular, false);

        // Viewer off to the side sees a dimmer highlight
        let off_fragment = Fragment {
            uv: fragment.uv,
            normal: fragment.normal,
            tangent: fragment.tangent,
            view_direction: Vec3::new(1.0, -1.0, 0.0).normalize(),
        };
        let off = shade_pixel(&off_fragment, &materials, &light, ShadingMode::Specular, false);

        assert!(peak.r > off.r);
    }
}
