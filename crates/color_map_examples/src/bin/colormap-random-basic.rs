use color_map::prelude::*;
use color_map_examples::{init_tracing, save_raster_png};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(7);
    let map = random_color_map(12, DEFAULT_IDW_EXPONENT, &mut rng)?;

    let config = RasterConfig::new(512, 512).with_key_overlay(true);
    let raster = fill_raster(&map, &config)?;
    save_raster_png(&raster, "colormap-random-basic.png")?;
    Ok(())
}
