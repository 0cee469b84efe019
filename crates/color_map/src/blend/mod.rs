//! Evaluation and blending of color maps.
//!
//! - [`color_at`]: inverse-distance weighted color at a position.
//! - [`deep_copy`] / [`deep_copy_into`]: independent copies.
//! - [`morph`] / [`morph_into`] / [`morph_with_scratch`]: cross-map interpolation.
pub mod idw;
pub mod morph;

pub use idw::{color_at, IDW_EPSILON};
pub use morph::{deep_copy, deep_copy_into, morph, morph_into, morph_with_scratch, MorphScratch};
