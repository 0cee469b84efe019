use color_map::prelude::*;
use color_map_examples::{init_tracing, save_raster_png, stack_horizontally};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EXPONENTS: [f32; 6] = [0.5, 1.0, 2.0, 4.0, 8.0, 32.0];

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(21);
    let mut map = random_color_map(10, DEFAULT_IDW_EXPONENT, &mut rng)?;

    let config = RasterConfig::new(192, 192).with_key_overlay(true);
    let mut panels = Vec::with_capacity(EXPONENTS.len());
    for exponent in EXPONENTS {
        map.set_idw_exponent(exponent)?;
        panels.push(fill_raster(&map, &config)?);
    }

    let strip = stack_horizontally(&panels, 4)?;
    save_raster_png(&strip, "colormap-exponent-sweep.png")?;
    Ok(())
}
