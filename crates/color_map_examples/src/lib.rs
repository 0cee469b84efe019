#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, save_raster_png, stack_horizontally};
