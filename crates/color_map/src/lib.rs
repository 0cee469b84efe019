//! color_map: scattered key colors over [0,1]^2, blended by inverse-distance weighting.
//!
//! Modules:
//! - map: quantized entries, the [`map::ColorMap`] container and an id-keyed registry
//! - blend: IDW evaluation, deep copies and morphing between two maps
//! - transfer: flat GPU buffers (plus a WGSL twin of the evaluator)
//! - raster: CPU materialization into RGBA8 pixels
//! - random: random maps for previews
//!
//! For examples, see the `color_map_examples` crate.
pub mod blend;
pub mod error;
pub mod map;
pub mod random;
pub mod raster;
pub mod transfer;

/// Convenient re-exports for common types. Import with `use color_map::prelude::*;`.
pub mod prelude {
    pub use crate::blend::{
        color_at, deep_copy, deep_copy_into, morph, morph_into, morph_with_scratch,
        MorphScratch, IDW_EPSILON,
    };
    pub use crate::error::{Error, Result};
    pub use crate::map::{
        Color8, ColorMap, ColorMapEntry, ColorMapRegistry, PackedPosition,
        DEFAULT_IDW_EXPONENT, EMPTY_COLOR, IDW_EXPONENT_RANGE,
    };
    pub use crate::random::random_color_map;
    pub use crate::raster::{fill_raster, fill_raster_into, ColorRaster, RasterConfig};
    pub use crate::transfer::{BufferEntry, GpuColorMap, GpuColorMapParams, WGSL_COLOR_AT};
}
