//! Copying and morphing color maps.
//!
//! [`morph`] interpolates between two maps for `t` ∈ [0,1]. Only the key positions are
//! linearly interpolated; everything in between changes smoothly but not linearly.
//! Keys present in just one input fade their weight in or out with `t`, so they
//! neither pop in nor leave a blob behind at the end points.
//!
//! Every entry point comes in an allocating form and an `_into` form that clears and
//! refills a caller-owned map. Passing the same map as input and output is ruled out
//! by the borrow checker; [`crate::map::ColorMapRegistry`] checks it for id-based calls.
use std::collections::HashSet;

use tracing::debug;

use crate::blend::idw::color_at;
use crate::error::{Error, Result};
use crate::map::{Color8, ColorMap, ColorMapEntry, PackedPosition};

/// Creates a completely independent copy of `source`.
pub fn deep_copy(source: &ColorMap) -> ColorMap {
    let mut out = ColorMap::with_capacity(source.len());
    deep_copy_into(source, &mut out);
    out
}

/// Overwrites `dest` with a copy of `source`, reusing the storage of `dest`.
pub fn deep_copy_into(source: &ColorMap, dest: &mut ColorMap) {
    dest.assign_from(source);
}

/// Reusable key-position sets for [`morph_with_scratch`].
///
/// Holds no map state between calls; keep one per thread to avoid reallocating.
#[derive(Debug, Default, Clone)]
pub struct MorphScratch {
    keys_a: HashSet<PackedPosition>,
    keys_b: HashSet<PackedPosition>,
    order: Vec<PackedPosition>,
}

impl MorphScratch {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.keys_a.clear();
        self.keys_b.clear();
        self.order.clear();
    }

    /// Collects the union of key positions, `a` first, each position once.
    fn collect(&mut self, a: &ColorMap, b: &ColorMap, t: f32) {
        self.clear();
        if t < 1.0 {
            for entry in a {
                let key = entry.packed_position();
                if self.keys_a.insert(key) {
                    self.order.push(key);
                }
            }
        }
        if t > 0.0 {
            for entry in b {
                let key = entry.packed_position();
                if self.keys_b.insert(key) && !self.keys_a.contains(&key) {
                    self.order.push(key);
                }
            }
        }
    }
}

/// Morphs from `a` to `b` by `t` ∈ [0,1] into a new map.
pub fn morph(a: &ColorMap, b: &ColorMap, t: f32) -> Result<ColorMap> {
    let mut out = ColorMap::new();
    morph_into(a, b, t, &mut out)?;
    Ok(out)
}

/// Morphs from `a` to `b` by `t` ∈ [0,1], clearing and refilling `out`.
pub fn morph_into(a: &ColorMap, b: &ColorMap, t: f32, out: &mut ColorMap) -> Result<()> {
    morph_with_scratch(a, b, t, out, &mut MorphScratch::new())
}

/// Like [`morph_into`] with caller-provided key workspace.
///
/// Fails with [`Error::OutOfRange`] if `t` is outside [0,1], leaving `out` untouched.
/// The result holds one entry per distinct key position of `a` (skipped when `t == 1`)
/// and `b` (skipped when `t == 0`), in that order. Its exponent is the linear
/// interpolation of the input exponents.
pub fn morph_with_scratch(
    a: &ColorMap,
    b: &ColorMap,
    t: f32,
    out: &mut ColorMap,
    scratch: &mut MorphScratch,
) -> Result<()> {
    if !(0.0..=1.0).contains(&t) {
        return Err(Error::out_of_range("t", t, 0.0, 1.0));
    }

    scratch.collect(a, b, t);
    out.reset(a.idw_exponent() + (b.idw_exponent() - a.idw_exponent()) * t);

    for &key in &scratch.order {
        let p = key.unpack();
        // At the end points the other map contributes nothing, not even a NaN.
        let mut color = if t == 0.0 {
            color_at(a, p)
        } else if t == 1.0 {
            color_at(b, p)
        } else {
            color_at(a, p) * (1.0 - t) + color_at(b, p) * t
        };
        if !scratch.keys_a.contains(&key) {
            color.w = t;
        } else if !scratch.keys_b.contains(&key) {
            color.w = 1.0 - t;
        }
        out.push(ColorMapEntry::from_packed(key, Color8::from_vec4(color)));
    }

    debug!(
        "Morphed {} + {} keys at t = {} into {} entries.",
        scratch.keys_a.len(),
        scratch.keys_b.len(),
        t,
        out.len()
    );
    Ok(())
}
