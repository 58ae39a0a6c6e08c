//! Per-frame rasterization: vertex transform, screen mapping, triangle
//! traversal, coverage and depth testing, perspective-correct interpolation.
//!
//! # Perspective-correct interpolation
//!
//! Screen-space barycentric weights are not affine in view space, so
//! attributes are never interpolated directly. Both the depth value and every
//! vertex attribute go through the reciprocal trick: interpolate `attr / w`
//! per vertex, then multiply by `1 / (Σ weight_i / w_i)`. This is the single
//! most delicate numerical detail in the pipeline.

use crate::camera::Camera;
use crate::colors::ColorRGB;
use crate::engine::{DisplayMode, RenderConfig};
use crate::light::DirectionalLight;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::{Mesh, VertexOut};
use crate::render::framebuffer::FrameBuffer;
use crate::render::shading::{shade_pixel, Fragment};
use crate::texture::MaterialSet;

/// Depth-buffer visualization window: depths in [0.995, 1.0] map to a
/// [0, 1] grayscale ramp, everything nearer renders black.
const DEPTH_VIS_MIN: f32 = 0.995;
const DEPTH_VIS_MAX: f32 = 1.0;

/// Transforms mesh vertices into post-divide NDC positions with retained w.
///
/// Positions go through world * view * projection; normals and tangents only
/// through the world matrix (directions, no translation). The output is
/// index-aligned with the mesh's vertex sequence.
pub fn transform_vertices(mesh: &Mesh, camera: &Camera) -> Vec<VertexOut> {
    let wvp = camera.projection_matrix() * camera.view_matrix() * mesh.world_matrix;

    mesh.vertices
        .iter()
        .map(|v| {
            let clip = wvp.transform_point(v.position);
            let w = clip.w;
            let world_position = mesh.world_matrix.transform_point(v.position).to_vec3();

            VertexOut {
                // Perspective divide on x, y, z; w kept for interpolation
                position: Vec4::new(clip.x / w, clip.y / w, clip.z / w, w),
                uv: v.uv,
                normal: mesh.world_matrix.transform_vector(v.normal),
                tangent: mesh.world_matrix.transform_vector(v.tangent),
                view_direction: (world_position - camera.origin()).normalize(),
                color: v.color,
            }
        })
        .collect()
}

/// Maps an NDC position to pixel coordinates.
///
/// NDC y increases upward but screen rows increase downward, hence the flip.
#[inline]
pub fn to_screen(ndc: Vec4, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        width as f32 * (ndc.x + 1.0) / 2.0,
        height as f32 * (1.0 - ndc.y) / 2.0,
    )
}

/// Tests a point against a triangle's three edge functions.
///
/// Returns the normalized barycentric weights when the point is covered:
/// all three edge values non-negative (points exactly on an edge count as
/// inside). Any negative value short-circuits to `None`.
#[inline]
pub fn coverage(s: &[Vec2; 3], p: Vec2, area: f32) -> Option<[f32; 3]> {
    let w0 = (s[2] - s[1]).cross(p - s[1]);
    if w0 < 0.0 {
        return None;
    }
    let w1 = (s[0] - s[2]).cross(p - s[2]);
    if w1 < 0.0 {
        return None;
    }
    let w2 = (s[1] - s[0]).cross(p - s[0]);
    if w2 < 0.0 {
        return None;
    }
    Some([w0 / area, w1 / area, w2 / area])
}

#[inline]
fn interp_vec2(weights: [f32; 3], values: [Vec2; 3], hw: [f32; 3], interpolated_w: f32) -> Vec2 {
    (values[0] / hw[0] * weights[0] + values[1] / hw[1] * weights[1]
        + values[2] / hw[2] * weights[2])
        * interpolated_w
}

#[inline]
fn interp_vec3(weights: [f32; 3], values: [Vec3; 3], hw: [f32; 3], interpolated_w: f32) -> Vec3 {
    (values[0] / hw[0] * weights[0] + values[1] / hw[1] * weights[1]
        + values[2] / hw[2] * weights[2])
        * interpolated_w
}

/// Draws every triangle of a mesh into the frame buffer.
///
/// Triangles with any vertex outside the NDC cube are rejected whole rather
/// than clipped.
pub fn draw_mesh(
    fb: &mut FrameBuffer,
    mesh: &Mesh,
    camera: &Camera,
    materials: &MaterialSet,
    light: &DirectionalLight,
    config: &RenderConfig,
) {
    let vertices_out = transform_vertices(mesh, camera);
    let screen: Vec<Vec2> = vertices_out
        .iter()
        .map(|v| to_screen(v.position, fb.width(), fb.height()))
        .collect();

    for [i0, i1, i2] in mesh.triangle_indices() {
        let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
        let triangle = [&vertices_out[i0], &vertices_out[i1], &vertices_out[i2]];

        if triangle
            .iter()
            .any(|v| Camera::is_outside_frustum(v.position))
        {
            continue;
        }

        draw_triangle(
            fb,
            triangle,
            [screen[i0], screen[i1], screen[i2]],
            materials,
            light,
            config,
        );
    }
}

/// Rasterizes one screen-space triangle: coverage test, depth test,
/// perspective-correct attribute interpolation, shading, pixel write.
pub fn draw_triangle(
    fb: &mut FrameBuffer,
    v: [&VertexOut; 3],
    s: [Vec2; 3],
    materials: &MaterialSet,
    light: &DirectionalLight,
    config: &RenderConfig,
) {
    // Signed area, computed once per triangle. Non-positive means the
    // triangle is degenerate or wound backwards; skip before any division.
    let area = (s[1] - s[0]).cross(s[2] - s[0]);
    if area <= f32::EPSILON {
        return;
    }

    // Bounding box, padded by one pixel to close seams between adjacent
    // triangles caused by edge rounding, then clamped to the buffer.
    let min_x = ((s[0].x.min(s[1].x).min(s[2].x)) as i32 - 1).max(0);
    let min_y = ((s[0].y.min(s[1].y).min(s[2].y)) as i32 - 1).max(0);
    let max_x = ((s[0].x.max(s[1].x).max(s[2].x)) as i32 + 1).min(fb.width() as i32 - 1);
    let max_y = ((s[0].y.max(s[1].y).max(s[2].y)) as i32 + 1).min(fb.height() as i32 - 1);

    let depth_z = [v[0].position.z, v[1].position.z, v[2].position.z];
    let hw = [v[0].position.w, v[1].position.w, v[2].position.w];

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let p = Vec2::new(px as f32, py as f32);

            let weights = match coverage(&s, p, area) {
                Some(weights) => weights,
                None => continue,
            };

            // Screen-space depth: reciprocal interpolation of post-divide z
            let depth = 1.0
                / (weights[0] / depth_z[0] + weights[1] / depth_z[1] + weights[2] / depth_z[2]);

            if !fb.depth_test(px as u32, py as u32, depth) {
                continue;
            }

            let color = match config.display_mode {
                DisplayMode::DepthBuffer => {
                    let ramp =
                        ((depth - DEPTH_VIS_MIN) / (DEPTH_VIS_MAX - DEPTH_VIS_MIN)).clamp(0.0, 1.0);
                    ColorRGB::splat(ramp)
                }
                DisplayMode::FinalColor => {
                    // Perspective-correct w, then attributes weighted by 1/w
                    let interpolated_w =
                        1.0 / (weights[0] / hw[0] + weights[1] / hw[1] + weights[2] / hw[2]);

                    let uv = interp_vec2(weights, [v[0].uv, v[1].uv, v[2].uv], hw, interpolated_w)
                        .clamp(0.0, 1.0);
                    let normal = interp_vec3(
                        weights,
                        [v[0].normal, v[1].normal, v[2].normal],
                        hw,
                        interpolated_w,
                    )
                    .normalize();
                    let tangent = interp_vec3(
                        weights,
                        [v[0].tangent, v[1].tangent, v[2].tangent],
                        hw,
                        interpolated_w,
                    )
                    .normalize();
                    let view_direction = interp_vec3(
                        weights,
                        [v[0].view_direction, v[1].view_direction, v[2].view_direction],
                        hw,
                        interpolated_w,
                    );

                    let fragment = Fragment {
                        uv,
                        normal,
                        tangent,
                        view_direction,
                    };
                    shade_pixel(
                        &fragment,
                        materials,
                        light,
                        config.shading_mode,
                        config.use_normal_map,
                    )
                }
            };

            fb.set_pixel(px as u32, py as u32, color.clamp().to_argb());
        }
    }
}
