//! Flat buffers for evaluating a [`ColorMap`] on the GPU.
//!
//! [`GpuColorMap::encode`] turns a map into `max(1, len)` [`BufferEntry`] records plus
//! the true entry count and the exponent. GPU buffers cannot be empty, so an empty map
//! sends a single record holding [`crate::map::EMPTY_COLOR`] at the origin with `count == 0`; the
//! shader must treat `count == 0` as "use the sentinel".
//!
//! [`WGSL_COLOR_AT`] is the shader side of the contract and mirrors
//! [`crate::blend::color_at`].
use tracing::trace;

use crate::map::ColorMap;

/// One key color as laid out in a GPU storage buffer (32 bytes).
///
/// WGSL aligns a struct holding a `vec4<f32>` to 16 bytes, so the array stride of
/// `ColorMapEntry` in [`WGSL_COLOR_AT`] is 32; `_pad` fills the tail to match.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BufferEntry {
    /// Normalized `(r, g, b, weight)`.
    pub color: [f32; 4],
    /// Position in [0,1]^2.
    pub position: [f32; 2],
    _pad: [f32; 2],
}

impl BufferEntry {
    pub const SIZE: usize = std::mem::size_of::<BufferEntry>();

    /// Record sent in place of an empty map.
    pub const SENTINEL: BufferEntry = BufferEntry::new([1.0, 0.0, 1.0, 1.0], [0.0, 0.0]);

    pub const fn new(color: [f32; 4], position: [f32; 2]) -> Self {
        Self {
            color,
            position,
            _pad: [0.0; 2],
        }
    }
}

/// A [`ColorMap`] ready for upload: records, true entry count and exponent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GpuColorMap {
    pub entries: Vec<BufferEntry>,
    /// Number of real entries; `0` means `entries` holds only the sentinel.
    pub count: u32,
    pub idw_exponent: f32,
}

impl GpuColorMap {
    /// Encodes `map` into a fresh buffer.
    pub fn encode(map: &ColorMap) -> Self {
        let mut out = Self {
            entries: Vec::with_capacity(map.len().max(1)),
            ..Default::default()
        };
        out.encode_from(map);
        out
    }

    /// Re-encodes `map` into this buffer, reusing its allocation.
    pub fn encode_from(&mut self, map: &ColorMap) {
        self.entries.clear();
        self.entries.extend(map.iter().map(|entry| {
            let p = entry.position();
            BufferEntry::new(entry.color().to_vec4().to_array(), [p.x, p.y])
        }));
        if self.entries.is_empty() {
            self.entries.push(BufferEntry::SENTINEL);
        }
        // Maps are meant to hold a few dozen entries.
        self.count = u32::try_from(map.len()).unwrap_or(u32::MAX);
        self.idw_exponent = map.idw_exponent();
        trace!(
            "Encoded color map: {} records, count {}, exponent {}.",
            self.entries.len(),
            self.count,
            self.idw_exponent
        );
    }

    /// Number of records in the buffer; never zero.
    pub fn record_count(&self) -> usize {
        self.entries.len()
    }

    /// Raw bytes of the records for a storage-buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }

    /// Uniforms to bind next to the buffer.
    pub fn params(&self) -> GpuColorMapParams {
        GpuColorMapParams {
            count: self.count,
            idw_exponent: self.idw_exponent,
            _pad: [0; 2],
        }
    }
}

/// Uniform block accompanying the record buffer (16 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuColorMapParams {
    pub count: u32,
    pub idw_exponent: f32,
    _pad: [u32; 2],
}

impl GpuColorMapParams {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// WGSL implementation of the inverse-distance lookup. The including shader declares
/// `color_map_entries: array<ColorMapEntry>` (storage) and `color_map_params:
/// ColorMapParams` (uniform) bindings.
pub const WGSL_COLOR_AT: &str = r#"
struct ColorMapEntry {
    color: vec4<f32>,
    position: vec2<f32>,
    _pad: vec2<f32>,
};

struct ColorMapParams {
    count: u32,
    idw_exponent: f32,
    _pad: vec2<u32>,
};

const COLOR_MAP_EPSILON: f32 = 1e-5;

fn color_map_at(pos: vec2<f32>) -> vec4<f32> {
    let params = color_map_params;
    if (params.count == 0u) {
        return color_map_entries[0].color;
    }
    var numerator = vec4<f32>(0.0);
    var denominator = 0.0;
    for (var i = 0u; i < params.count; i++) {
        let entry = color_map_entries[i];
        let delta = entry.position - pos;
        var d = dot(delta, delta) + COLOR_MAP_EPSILON;
        if (params.idw_exponent != 2.0) {
            d = pow(d, params.idw_exponent * 0.5);
        }
        d += COLOR_MAP_EPSILON;
        let weight = (1.0 / d) * entry.color.a;
        numerator += weight * vec4<f32>(entry.color.rgb, 1.0);
        denominator += weight;
    }
    return numerator / denominator;
}
"#;
