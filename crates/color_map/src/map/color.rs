//! Fixed-width 8-bit color with an importance weight channel.
use glam::Vec4;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Color of a map that has no entries (opaque magenta).
///
/// Chosen to be obviously wrong on screen so an unconfigured map is easy to spot.
pub const EMPTY_COLOR: Vec4 = Vec4::new(1.0, 0.0, 1.0, 1.0);

/// An sRGB-agnostic 8-bit color plus an 8-bit weight.
///
/// `weight` scales how strongly an entry pulls on inverse-distance queries. It is not
/// transparency: a weight of 0 makes the entry invisible, 255 is full influence.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct Color8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub weight: u8,
}

impl Color8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, weight: u8) -> Self {
        Self { r, g, b, weight }
    }

    /// Color with full weight.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn with_weight(self, weight: u8) -> Self {
        Self { weight, ..self }
    }

    /// Weight as a fraction in [0, 1].
    #[inline]
    pub fn weight_f32(self) -> f32 {
        self.weight as f32 / 255.0
    }

    /// Normalized `(r, g, b, weight)`.
    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32,
            self.g as f32,
            self.b as f32,
            self.weight as f32,
        ) / 255.0
    }

    /// Normalized `(r, g, b, 1)`; the weight channel is dropped.
    #[inline]
    pub fn opaque_vec4(self) -> Vec4 {
        self.with_weight(255).to_vec4()
    }

    /// Quantizes a normalized color, clamping each channel to [0, 1] and rounding to the
    /// nearest step. NaN channels become 0.
    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(
            quantize_channel(v.x),
            quantize_channel(v.y),
            quantize_channel(v.z),
            quantize_channel(v.w),
        )
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.weight]
    }
}

impl From<[u8; 4]> for Color8 {
    fn from([r, g, b, weight]: [u8; 4]) -> Self {
        Self::new(r, g, b, weight)
    }
}

impl From<Color8> for [u8; 4] {
    fn from(c: Color8) -> Self {
        c.to_array()
    }
}

#[inline]
fn quantize_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
