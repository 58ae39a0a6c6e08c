//! Owned color and depth buffers for one render target.

use std::path::Path;

use crate::colors;

/// A width x height render target: packed ARGB color buffer plus a parallel
/// f32 depth buffer, both row-major.
///
/// Buffers are cleared between frames, never reallocated. The depth buffer
/// holds the nearest depth found so far for each pixel and starts each frame
/// at `f32::MAX`.
pub struct FrameBuffer {
    color: Vec<u32>,
    depth: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color: vec![colors::CLEAR_COLOR; size],
            depth: vec![f32::MAX; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fills the color buffer with the clear color.
    pub fn clear_color(&mut self) {
        self.color.fill(colors::CLEAR_COLOR);
    }

    /// Resets every depth value to the maximum representable float.
    pub fn reset_depth_buffer(&mut self) {
        self.depth.fill(f32::MAX);
    }

    /// Runs the depth test for a fragment and claims the pixel on success.
    ///
    /// The fragment is rejected when the stored depth is already less than
    /// the candidate (a nearer surface owns the pixel). On success the new
    /// depth is stored and the caller may write the color.
    #[inline]
    pub fn depth_test(&mut self, x: u32, y: u32, depth: f32) -> bool {
        let idx = (y * self.width + x) as usize;
        if self.depth[idx] < depth {
            return false;
        }
        self.depth[idx] = depth;
        true
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        self.color[(y * self.width + x) as usize] = color;
    }

    #[inline]
    pub fn pixel_at(&self, x: u32, y: u32) -> u32 {
        self.color[(y * self.width + x) as usize]
    }

    #[inline]
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[(y * self.width + x) as usize]
    }

    /// The color buffer as raw bytes (ARGB8888), for blitting to a surface.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(self.color.as_ptr() as *const u8, self.color.len() * 4)
        }
    }

    /// Saves the current color buffer as an image file.
    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let mut rgb = Vec::with_capacity(self.color.len() * 3);
        for argb in &self.color {
            rgb.push(((argb >> 16) & 0xFF) as u8);
            rgb.push(((argb >> 8) & 0xFF) as u8);
            rgb.push((argb & 0xFF) as u8);
        }
        image::save_buffer(
            path,
            &rgb,
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_buffer_resets_to_max_float() {
        for (w, h) in [(1, 1), (3, 7), (800, 600)] {
            let mut fb = FrameBuffer::new(w, h);
            fb.depth_test(0, 0, 0.5);
            fb.reset_depth_buffer();
            for y in 0..h {
                for x in 0..w {
                    assert_eq!(fb.depth_at(x, y), f32::MAX);
                }
            }
        }
    }

    #[test]
    fn nearer_fragment_wins_the_pixel() {
        let mut fb = FrameBuffer::new(4, 4);
        assert!(fb.depth_test(1, 1, 0.8));
        assert!(fb.depth_test(1, 1, 0.3));
        // Stored depth is now 0.3; a farther fragment must lose
        assert!(!fb.depth_test(1, 1, 0.8));
    }

    #[test]
    fn buffers_start_at_clear_color() {
        let fb = FrameBuffer::new(2, 2);
        assert_eq!(fb.pixel_at(0, 0), crate::colors::CLEAR_COLOR);
    }
}
