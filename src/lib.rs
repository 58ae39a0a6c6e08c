//! A CPU-based software rasterizer with perspective-correct texturing,
//! depth buffering and a diffuse/specular lighting model.
//!
//! SDL2 is used only for window management, input and display; every pixel
//! is produced on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use softrender::prelude::*;
//!
//! let mut window = Window::new("My App", 800, 600)?;
//! let mut engine = Engine::new(800, 600);
//! engine.add_mesh(Mesh::from_obj("assets/vehicle.obj")?);
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod texture;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use engine::{DisplayMode, Engine, RenderConfig, ShadingMode};
pub use mesh::{LoadError, Mesh, PrimitiveTopology};
pub use texture::{MaterialSet, Texture};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softrender::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::Camera;

    // Engine
    pub use crate::engine::{DisplayMode, Engine, RenderConfig, ShadingMode};

    // Scene data
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{Mesh, PrimitiveTopology, Vertex};
    pub use crate::texture::{MaterialSet, Texture};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Window & Input
    pub use crate::window::{FrameLimiter, InputState, ToggleEvents, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::mesh::VertexOut;
    pub use crate::render::pipeline::{coverage, draw_triangle, to_screen, transform_vertices};
    pub use crate::render::FrameBuffer;
}
