//! Inverse-distance weighted evaluation of a [`ColorMap`].
//!
//! The same formula runs on external GPU evaluators fed by [`crate::transfer`], so the
//! arithmetic here (epsilon placement, exponent branch, `f32` precision) is part of the
//! contract and must stay in sync with them.
use glam::{Vec2, Vec4};

use crate::map::{ColorMap, EMPTY_COLOR};

/// Added to distances so a query exactly on a key does not divide by zero.
pub const IDW_EPSILON: f32 = 1.0e-5;

/// Computes the normalized color of `map` at `p`, with alpha at `1`.
///
/// Each entry contributes `weight / 255 / d` where
/// `d = (|p - position|² + ε)^(exponent / 2) + ε`; the power is skipped for the
/// common exponent of 2. An empty map yields [`EMPTY_COLOR`]. If every entry has
/// weight 0 the result is NaN.
pub fn color_at(map: &ColorMap, p: Vec2) -> Vec4 {
    if map.is_empty() {
        return EMPTY_COLOR;
    }

    let exponent = map.idw_exponent();
    let half_exponent = exponent * 0.5;
    let mut numerator = Vec4::ZERO;
    let mut denominator = 0.0f32;

    for entry in map {
        let mut d = entry.position().distance_squared(p) + IDW_EPSILON;
        if exponent != 2.0 {
            d = d.powf(half_exponent);
        }
        d += IDW_EPSILON;

        let weight = d.recip() * entry.color().weight_f32();
        numerator += weight * entry.color().opaque_vec4();
        denominator += weight;
    }

    numerator / denominator
}
