//! The rasterization pipeline: frame buffers, triangle traversal, shading.

pub mod framebuffer;
pub mod pipeline;
pub mod shading;

pub use framebuffer::FrameBuffer;
pub use shading::Fragment;
