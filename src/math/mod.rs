//! Math primitives for the rendering pipeline.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
