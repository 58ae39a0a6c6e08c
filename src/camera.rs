//! Free-look camera owning the view and projection transforms.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! Orientation is accumulated as yaw (Y-axis) and pitch (X-axis) angles; the
//! forward vector is rebuilt from them every update, and the right/up basis is
//! re-orthonormalized against the fixed world up.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::window::InputState;

/// Camera translation speed in world units per second.
const MOVE_SPEED: f32 = 10.0;
/// Look speed in radians per second per mouse count.
const ROTATION_SPEED: f32 = std::f32::consts::FRAC_PI_2;

/// A camera with position, yaw/pitch orientation and cached transforms.
///
/// The view matrix is recomputed every [`Camera::update`]. The projection
/// matrix is recomputed only when the field of view or aspect ratio changed
/// since the last update (recomputing it every frame would be correct but
/// wasteful).
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,

    total_yaw: f32,
    total_pitch: f32,

    /// Projection scale factor: tan(fov / 2).
    fov_scale: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,

    view_matrix: Mat4,
    projection_matrix: Mat4,
    projection_dirty: bool,
}

impl Camera {
    /// Creates a camera at `origin` looking along +Z.
    pub fn new(aspect_ratio: f32, fov_degrees: f32, origin: Vec3) -> Self {
        let mut camera = Self {
            origin,
            forward: Vec3::FORWARD,
            up: Vec3::UP,
            right: Vec3::RIGHT,
            total_yaw: 0.0,
            total_pitch: 0.0,
            fov_scale: (fov_degrees.to_radians() / 2.0).tan(),
            aspect_ratio,
            near: 0.1,
            far: 100.0,
            view_matrix: Mat4::identity(),
            projection_matrix: Mat4::identity(),
            projection_dirty: true,
        };
        camera.recompute_view_matrix();
        camera.recompute_projection_if_dirty();
        camera
    }

    /// Applies per-frame input and refreshes the cached matrices.
    ///
    /// # Input Mapping
    /// - W/S: move along forward, A/D: strafe along right, Q/E: up/down
    /// - RMB drag: yaw/pitch look
    /// - LMB drag: move forward/backward
    /// - LMB+RMB drag: move up/down
    pub fn update(&mut self, input: &InputState, elapsed_seconds: f32) {
        let move_amount = MOVE_SPEED * elapsed_seconds;

        if input.forward {
            self.origin = self.origin + self.forward * move_amount;
        }
        if input.back {
            self.origin = self.origin - self.forward * move_amount;
        }
        if input.right {
            self.origin = self.origin + self.right * move_amount;
        }
        if input.left {
            self.origin = self.origin - self.right * move_amount;
        }
        if input.up {
            self.origin = self.origin + self.up * move_amount;
        }
        if input.down {
            self.origin = self.origin - self.up * move_amount;
        }

        let (dx, dy) = input.mouse_delta;
        if input.left_button && input.right_button {
            if dy != 0 {
                let dir = if dy < 0 { 1.0 } else { -1.0 };
                self.origin = self.origin + self.up * (dir * move_amount);
            }
        } else if input.right_button {
            self.total_yaw += dx as f32 * ROTATION_SPEED * elapsed_seconds;
            self.total_pitch -= dy as f32 * ROTATION_SPEED * elapsed_seconds;
        } else if input.left_button && dy != 0 {
            let dir = if dy < 0 { 1.0 } else { -1.0 };
            self.origin = self.origin + self.forward * (dir * move_amount);
        }

        // Rebuild forward from accumulated angles: pitch first, then yaw.
        let rotation = Mat4::rotation_y(self.total_yaw) * Mat4::rotation_x(self.total_pitch);
        self.forward = rotation.transform_vector(Vec3::FORWARD);

        self.recompute_view_matrix();
        self.recompute_projection_if_dirty();
    }

    /// Re-orthonormalizes the basis from the fixed world up and derives the
    /// view matrix as the inverse of the camera's world transform.
    fn recompute_view_matrix(&mut self) {
        self.right = Vec3::UP.cross(self.forward).normalize();
        self.up = self.forward.cross(self.right);

        let world = Mat4::from_basis(self.right, self.up, self.forward, self.origin);
        self.view_matrix = world.inverse_rigid();
    }

    fn recompute_projection_if_dirty(&mut self) {
        if self.projection_dirty {
            self.projection_matrix =
                Mat4::perspective_lh(self.fov_scale, self.aspect_ratio, self.near, self.far);
            self.projection_dirty = false;
        }
    }

    /// Changes the field of view; the projection matrix is rebuilt on the
    /// next update.
    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.fov_scale = (fov_degrees.to_radians() / 2.0).tan();
        self.projection_dirty = true;
    }

    /// Changes the aspect ratio (window resize); the projection matrix is
    /// rebuilt on the next update.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.projection_dirty = true;
    }

    /// Whether an NDC-space position falls outside the visible volume.
    ///
    /// Triangles with any vertex outside are rejected whole rather than
    /// clipped; large triangles crossing the boundary will pop.
    pub fn is_outside_frustum(ndc: Vec4) -> bool {
        ndc.x < -1.0
            || ndc.x > 1.0
            || ndc.y < -1.0
            || ndc.y > 1.0
            || ndc.z < -1.0
            || ndc.z > 1.0
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }
}
