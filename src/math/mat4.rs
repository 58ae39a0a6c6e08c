//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! The coordinate system is left-handed: +X right, +Y up, +Z into the screen.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column (column-major convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a left-handed perspective projection matrix.
    ///
    /// `fov_scale` is `tan(fov_y / 2)`, the projection scale factor the camera
    /// derives from its field-of-view angle. Clip-space w equals view-space z,
    /// and z maps to [0, 1] between the near and far planes (DirectX-style).
    pub fn perspective_lh(fov_scale: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let zz = far / (far - near);
        Mat4::new([
            [1.0 / (aspect_ratio * fov_scale), 0.0, 0.0, 0.0],
            [0.0, 1.0 / fov_scale, 0.0, 0.0],
            [0.0, 0.0, zz, -near * zz],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Builds a world transform from an orthonormal basis and an origin.
    ///
    /// The basis vectors become the matrix columns; `origin` the translation.
    /// This is the camera's world transform; its view matrix is the rigid
    /// inverse of this.
    pub fn from_basis(right: Vec3, up: Vec3, forward: Vec3, origin: Vec3) -> Self {
        Mat4::new([
            [right.x, up.x, forward.x, origin.x],
            [right.y, up.y, forward.y, origin.y],
            [right.z, up.z, forward.z, origin.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (row, row_values) in self.data.iter().enumerate() {
            for (col, value) in row_values.iter().enumerate() {
                out[col][row] = *value;
            }
        }
        Mat4::new(out)
    }

    /// Inverts a rigid transform (orthonormal rotation + translation).
    ///
    /// For `M = T(t) * R` the inverse is `R^T * T(-t)`: transpose the rotation
    /// block and counter-rotate the translation. Not valid for matrices with
    /// scale or projection terms.
    pub fn inverse_rigid(&self) -> Self {
        let m = &self.data;
        let tx = -(m[0][0] * m[0][3] + m[1][0] * m[1][3] + m[2][0] * m[2][3]);
        let ty = -(m[0][1] * m[0][3] + m[1][1] * m[1][3] + m[2][1] * m[2][3]);
        let tz = -(m[0][2] * m[0][3] + m[1][2] * m[1][3] + m[2][2] * m[2][3]);
        Mat4::new([
            [m[0][0], m[1][0], m[2][0], tx],
            [m[0][1], m[1][1], m[2][1], ty],
            [m[0][2], m[1][2], m[2][2], tz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transforms a point, keeping the homogeneous w component.
    ///
    /// The caller is responsible for the perspective divide; w is retained so
    /// the rasterizer can do perspective-correct interpolation later.
    #[inline]
    pub fn transform_point(&self, v: Vec3) -> Vec4 {
        *self * Vec4::point(v.x, v.y, v.z)
    }

    /// Transforms a direction: rotation/scale only, never translation.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = &self.data;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn direction_transform_ignores_translation() {
        let m = Mat4::translation(10.0, 20.0, 30.0);
        let v = m.transform_vector(Vec3::FORWARD);
        assert_eq!(v, Vec3::FORWARD);
    }

    #[test]
    fn point_transform_applies_translation_and_keeps_w() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let p = m.transform_point(Vec3::ZERO);
        assert_eq!(p, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn rotation_y_turns_forward_toward_right() {
        // Left-handed: positive yaw looks right
        let m = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        let v = m.transform_vector(Vec3::FORWARD);
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rigid_inverse_undoes_transform() {
        let m = Mat4::translation(3.0, -1.0, 2.0) * Mat4::rotation_y(0.7);
        let round_trip = m.inverse_rigid() * m;
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_relative_eq!(round_trip.get(row, col), expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn perspective_keeps_view_z_in_w() {
        let proj = Mat4::perspective_lh(1.0, 1.0, 0.1, 100.0);
        let clip = proj.transform_point(Vec3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(clip.w, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth_range() {
        let proj = Mat4::perspective_lh(1.0, 1.0, 0.1, 100.0);
        let near = proj.transform_point(Vec3::new(0.0, 0.0, 0.1));
        let far = proj.transform_point(Vec3::new(0.0, 0.0, 100.0));
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }
}
