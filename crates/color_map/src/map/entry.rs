//! Quantized color map entries.
//!
//! A [`ColorMapEntry`] packs a position in [0,1]^2 into two 16-bit fractions
//! ([`PackedPosition`]) next to an 8-bit [`Color8`]. Positions are rounded with
//! `round(v * 65535)` and decoded with `raw / 65535`, so a round trip is off by at most
//! `1 / 65535` per axis.
use std::hash::{Hash, Hasher};

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::map::color::Color8;

/// Largest raw value of a packed axis; decodes to `1.0`.
pub const POSITION_SCALE: f32 = u16::MAX as f32;

/// Two 16-bit fixed-point fractions of the unit square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackedPosition {
    pub x: u16,
    pub y: u16,
}

impl PackedPosition {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Packs `p`, failing with [`Error::OutOfRange`] if a coordinate lies outside [0, 1].
    pub fn pack(p: Vec2) -> Result<Self> {
        Ok(Self {
            x: pack_axis("position.x", p.x)?,
            y: pack_axis("position.y", p.y)?,
        })
    }

    #[inline]
    pub fn unpack(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32) / POSITION_SCALE
    }

    /// Swaps the two axes.
    #[inline]
    pub const fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }
}

fn pack_axis(what: &'static str, v: f32) -> Result<u16> {
    // Also rejects NaN.
    if !(0.0..=1.0).contains(&v) {
        return Err(Error::out_of_range(what, v, 0.0, 1.0));
    }
    Ok((v * POSITION_SCALE).round() as u16)
}

/// A key color at a quantized position.
///
/// Entries are values: "setters" such as [`ColorMapEntry::with_color`] return a new entry.
/// Equality and hashing consider the packed position and `r, g, b`, but not the weight.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorMapEntry {
    x: u16,
    y: u16,
    r: u8,
    g: u8,
    b: u8,
    weight: u8,
}

impl ColorMapEntry {
    /// Creates an entry at `position` ∈ [0,1]^2.
    pub fn new(position: impl Into<Vec2>, color: Color8) -> Result<Self> {
        let packed = PackedPosition::pack(position.into())?;
        Ok(Self::from_packed(packed, color))
    }

    /// Creates an entry from its raw representation. Never fails.
    pub const fn from_packed(position: PackedPosition, color: Color8) -> Self {
        Self {
            x: position.x,
            y: position.y,
            r: color.r,
            g: color.g,
            b: color.b,
            weight: color.weight,
        }
    }

    #[inline]
    pub const fn packed_position(&self) -> PackedPosition {
        PackedPosition::new(self.x, self.y)
    }

    /// Decoded position in [0,1]^2.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.packed_position().unpack()
    }

    /// The `(r, g, b)` color; the fourth channel holds the weight.
    #[inline]
    pub const fn color(&self) -> Color8 {
        Color8::new(self.r, self.g, self.b, self.weight)
    }

    #[inline]
    pub const fn weight(&self) -> u8 {
        self.weight
    }

    /// Returns a copy at the same packed position with a different color.
    pub const fn with_color(&self, color: Color8) -> Self {
        Self::from_packed(self.packed_position(), color)
    }

    /// Returns a copy with its x and y swapped.
    pub const fn transposed(&self) -> Self {
        Self::from_packed(self.packed_position().transposed(), self.color())
    }
}

impl PartialEq for ColorMapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.r == other.r
            && self.g == other.g
            && self.b == other.b
    }
}

impl Eq for ColorMapEntry {}

impl Hash for ColorMapEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.x, self.y, self.r, self.g, self.b).hash(state);
    }
}
