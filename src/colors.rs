//! Float RGB color with packing helpers.
//!
//! Colors flow through the shading pipeline as floats in [0, 1] per channel
//! and are packed to ARGB8888 only when written into the frame buffer.

use std::ops::{Add, Div, Mul};

/// The frame clear color: mid gray (100, 100, 100).
pub const CLEAR_COLOR: u32 = pack_rgb8(100, 100, 100);

/// Packs 8-bit channels into ARGB8888 with full alpha.
pub const fn pack_rgb8(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// An RGB color with float channels.
///
/// Channels are nominally in [0, 1] but additive lighting can push them above
/// 1; call [`ColorRGB::clamp`] before packing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRGB {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorRGB {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// A gray color with all three channels equal.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Clamps every channel to [0, 1].
    pub fn clamp(&self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Packs to ARGB8888. Channels must already be in [0, 1].
    pub fn to_argb(&self) -> u32 {
        pack_rgb8(
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
        )
    }

    /// Unpacks an ARGB8888 pixel into float channels.
    pub fn from_argb(argb: u32) -> Self {
        Self::new(
            ((argb >> 16) & 0xFF) as f32 / 255.0,
            ((argb >> 8) & 0xFF) as f32 / 255.0,
            (argb & 0xFF) as f32 / 255.0,
        )
    }
}

/// Component-wise addition (additive lighting terms).
impl Add<ColorRGB> for ColorRGB {
    type Output = ColorRGB;

    fn add(self, rhs: ColorRGB) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

/// Component-wise modulation of two colors.
impl Mul<ColorRGB> for ColorRGB {
    type Output = ColorRGB;

    fn mul(self, rhs: ColorRGB) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

/// Scalar scaling of a color.
impl Mul<f32> for ColorRGB {
    type Output = ColorRGB;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

/// Scalar division of a color.
impl Div<f32> for ColorRGB {
    type Output = ColorRGB;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trips() {
        let c = ColorRGB::new(1.0, 0.5, 0.0);
        let back = ColorRGB::from_argb(c.to_argb());
        assert!((back.r - 1.0).abs() < 1.0 / 255.0);
        assert!((back.g - 0.5).abs() < 1.0 / 255.0);
        assert!(back.b.abs() < 1.0 / 255.0);
    }

    #[test]
    fn clamp_caps_overbright_channels() {
        let c = ColorRGB::new(1.7, 0.3, -0.1).clamp();
        assert_eq!(c, ColorRGB::new(1.0, 0.3, 0.0));
    }

    #[test]
    fn clear_color_is_mid_gray() {
        assert_eq!(CLEAR_COLOR, 0xFF646464);
    }
}
