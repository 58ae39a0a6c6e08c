//! Core rendering engine and per-frame configuration.
//!
//! The [`Engine`] owns the frame buffer, camera, meshes and materials, and
//! produces one complete frame per [`Engine::render`] call. All per-frame
//! mode state lives in an immutable [`RenderConfig`] value built by the input
//! step and passed into the render call; nothing toggles mid-frame.

use log::debug;

use crate::camera::Camera;
use crate::light::DirectionalLight;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::{pipeline, FrameBuffer};
use crate::texture::MaterialSet;
use crate::window::{InputState, ToggleEvents};

/// Mesh auto-rotation speed in radians per second.
const ROTATION_SPEED: f32 = 1.0;

/// What the frame buffer displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// The shaded scene.
    #[default]
    FinalColor,
    /// The depth buffer as grayscale.
    DepthBuffer,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::FinalColor => DisplayMode::DepthBuffer,
            DisplayMode::DepthBuffer => DisplayMode::FinalColor,
        }
    }
}

/// Which lighting terms the pixel shader outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Full model: (diffuse + specular) modulated by the Lambert term.
    #[default]
    Combined,
    /// Diffuse term only.
    Diffuse,
    /// Lambert cosine term only, as grayscale.
    ObservedArea,
    /// Specular term only.
    Specular,
}

impl ShadingMode {
    /// Advances the 4-way cycle: combined, diffuse, observed area, specular.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::Combined => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::ObservedArea,
            ShadingMode::ObservedArea => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
        }
    }
}

/// The per-frame render configuration.
///
/// Built once per frame from the previous frame's value plus this frame's
/// edge-triggered toggle events; immutable while a frame renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub display_mode: DisplayMode,
    pub shading_mode: ShadingMode,
    pub use_normal_map: bool,
    pub rotating: bool,
}

impl RenderConfig {
    /// Produces the next frame's configuration from this frame's toggle
    /// events.
    pub fn apply_toggles(&self, toggles: &ToggleEvents) -> Self {
        let mut next = *self;
        if toggles.display_mode {
            next.display_mode = next.display_mode.toggled();
        }
        if toggles.shading_mode {
            next.shading_mode = next.shading_mode.next();
        }
        if toggles.normal_map {
            next.use_normal_map = !next.use_normal_map;
        }
        if toggles.rotate {
            next.rotating = !next.rotating;
        }
        if *toggles != ToggleEvents::default() {
            debug!("render config now {next:?}");
        }
        next
    }
}

/// The renderer: owns buffers, camera, scene data, and runs the pipeline.
pub struct Engine {
    framebuffer: FrameBuffer,
    camera: Camera,
    meshes: Vec<Mesh>,
    original_world_matrices: Vec<Mat4>,
    materials: MaterialSet,
    light: DirectionalLight,
    rotation_angle: f32,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        let aspect_ratio = width as f32 / height as f32;
        Self {
            framebuffer: FrameBuffer::new(width, height),
            camera: Camera::new(aspect_ratio, 45.0, Vec3::new(0.0, 5.0, -50.0)),
            meshes: Vec::new(),
            original_world_matrices: Vec::new(),
            materials: MaterialSet::neutral(),
            light: DirectionalLight::scene_default(),
            rotation_angle: 0.0,
        }
    }

    /// Adds a mesh; its current world matrix becomes the rotation pivot.
    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.original_world_matrices.push(mesh.world_matrix);
        self.meshes.push(mesh);
    }

    pub fn set_materials(&mut self, materials: MaterialSet) {
        self.materials = materials;
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Recreates the frame buffer and updates the camera's aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer = FrameBuffer::new(width, height);
        self.camera.set_aspect_ratio(width as f32 / height as f32);
    }

    /// Advances camera and animation state for one frame.
    ///
    /// While rotating, each mesh's world matrix is re-derived from the angle
    /// accumulated so far and the matrix it was added with; pausing freezes
    /// the angle rather than resetting it.
    pub fn update(&mut self, input: &InputState, elapsed_seconds: f32, config: &RenderConfig) {
        self.camera.update(input, elapsed_seconds);

        if config.rotating {
            self.rotation_angle += ROTATION_SPEED * elapsed_seconds;
        }
        let rotation = Mat4::rotation_y(self.rotation_angle);
        for (mesh, original) in self.meshes.iter_mut().zip(&self.original_world_matrices) {
            mesh.world_matrix = rotation * *original;
        }
    }

    /// Renders one complete frame into the owned frame buffer.
    pub fn render(&mut self, config: &RenderConfig) {
        self.framebuffer.clear_color();
        self.framebuffer.reset_depth_buffer();

        for mesh in &self.meshes {
            pipeline::draw_mesh(
                &mut self.framebuffer,
                mesh,
                &self.camera,
                &self.materials,
                &self.light,
                config,
            );
        }
    }

    /// The rendered frame as bytes (ARGB8888), for presentation.
    pub fn frame_bytes(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Saves the current color buffer to an image file.
    pub fn save_snapshot(&self, path: &str) -> Result<(), image::ImageError> {
        self.framebuffer.save_image(path)
    }
}
