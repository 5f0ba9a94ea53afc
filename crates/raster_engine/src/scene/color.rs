//! Vertex colors and stored pixel values

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::foundation::math::utils;

/// RGB color with channels normalized to `[0, 1]`
///
/// Colors are attached to primitive endpoints and interpolated linearly by
/// the clipper and the rasterizer. Values outside the unit range are kept
/// as-is and only clamped when converted to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Pure red
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Pure green
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Pure blue
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Yellow
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0);
    /// Cyan
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0);
    /// Magenta
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0);
    /// Mid gray
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5);
    /// White
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a color from normalized channels
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from byte channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    /// Blend towards `other`; `t = 0` yields `self`, `t = 1` yields `other`
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            utils::lerp(self.r, other.r, t),
            utils::lerp(self.g, other.g, t),
            utils::lerp(self.b, other.b, t),
        )
    }

    /// Quantize to bytes, clamping to the unit range and rounding half away from zero
    pub fn to_rgb8(&self) -> Rgb8 {
        fn channel(value: f32) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Rgb8::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Rgb8> for Color {
    fn from(pixel: Rgb8) -> Self {
        Self::from_rgb8(pixel.r, pixel.g, pixel.b)
    }
}

/// A stored pixel: one byte per channel
///
/// `#[repr(C)]` so a pixel slice can be viewed as the raw byte triples the
/// pixel map format expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgb8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb8 {
    /// Black pixel
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White pixel
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a pixel value
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(pixel: Rgb8) -> Self {
        [pixel.r, pixel.g, pixel.b]
    }
}

impl From<Color> for Rgb8 {
    fn from(color: Color) -> Self {
        color.to_rgb8()
    }
}
