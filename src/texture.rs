//! Texture storage and nearest-neighbor sampling.

use std::path::Path;

use crate::colors::ColorRGB;
use crate::math::vec2::Vec2;

/// A 2D pixel grid sampled by normalized UV coordinates.
pub struct Texture {
    data: Vec<u32>, // ARGB pixels, row-major
    width: u32,
    height: u32,
}

impl Texture {
    /// Loads a texture from an image file (PNG, JPG, etc.).
    ///
    /// A missing or undecodable file is fatal at initialization; the shading
    /// stage cannot run without its texture maps.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a texture from raw ARGB pixels.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height`.
    pub fn from_pixels(data: Vec<u32>, width: u32, height: u32) -> Self {
        assert_eq!(data.len(), (width * height) as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// A 1x1 texture of a single color. Handy in tests.
    pub fn solid(color: ColorRGB) -> Self {
        Self::from_pixels(vec![color.to_argb()], 1, 1)
    }

    /// Samples the texture at a normalized UV with nearest-neighbor lookup.
    ///
    /// UV is clamped to [0, 1] before indexing, so off-surface coordinates
    /// read the border texel rather than out-of-bounds memory.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> ColorRGB {
        let uv = uv.clamp(0.0, 1.0);
        let x = ((uv.x * self.width as f32) as u32).min(self.width - 1);
        let y = ((uv.y * self.height as f32) as u32).min(self.height - 1);
        ColorRGB::from_argb(self.data[(y * self.width + x) as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// The texture maps the lighting model needs for one surface.
pub struct MaterialSet {
    pub diffuse: Texture,
    pub normal_map: Texture,
    pub specular: Texture,
    pub glossiness: Texture,
}

impl MaterialSet {
    /// Loads all four maps, failing on the first unreadable file.
    pub fn from_files<P: AsRef<Path>>(
        diffuse: P,
        normal_map: P,
        specular: P,
        glossiness: P,
    ) -> Result<Self, image::ImageError> {
        Ok(Self {
            diffuse: Texture::from_file(diffuse)?,
            normal_map: Texture::from_file(normal_map)?,
            specular: Texture::from_file(specular)?,
            glossiness: Texture::from_file(glossiness)?,
        })
    }

    /// A neutral material: white diffuse, flat normal map, no specular.
    pub fn neutral() -> Self {
        Self {
            diffuse: Texture::solid(ColorRGB::WHITE),
            // Flat tangent-space normal (0, 0, 1) encoded as a color
            normal_map: Texture::solid(ColorRGB::new(0.5, 0.5, 1.0)),
            specular: Texture::solid(ColorRGB::BLACK),
            glossiness: Texture::solid(ColorRGB::BLACK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_reads_the_right_texel() {
        // 2x2 checkerboard: white, black / black, white
        let w = ColorRGB::WHITE.to_argb();
        let b = ColorRGB::BLACK.to_argb();
        let tex = Texture::from_pixels(vec![w, b, b, w], 2, 2);

        assert_eq!(tex.sample(Vec2::new(0.0, 0.0)), ColorRGB::WHITE);
        assert_eq!(tex.sample(Vec2::new(0.9, 0.0)), ColorRGB::BLACK);
        assert_eq!(tex.sample(Vec2::new(0.9, 0.9)), ColorRGB::WHITE);
    }

    #[test]
    fn out_of_range_uv_clamps_to_border() {
        let tex = Texture::solid(ColorRGB::new(0.2, 0.4, 0.6));
        let sampled = tex.sample(Vec2::new(3.5, -2.0));
        assert!((sampled.r - 0.2).abs() < 1.0 / 255.0);
        assert!((sampled.b - 0.6).abs() < 1.0 / 255.0);
    }
}
