use color_map::prelude::*;
use color_map_examples::{init_tracing, save_raster_png, stack_horizontally};
use glam::Vec2;
use tracing::info;

const FRAMES: usize = 7;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // work, a, b
    let mut registry = ColorMapRegistry::with_capacity(3);
    registry.insert("work", sunrise()?);
    registry.copy("work", "a")?;
    registry.insert("b", dusk()?);

    let config = RasterConfig::new(160, 160).with_key_overlay(true);
    let mut frames = Vec::with_capacity(FRAMES);
    for i in 0..FRAMES {
        let t = i as f32 / (FRAMES - 1) as f32;
        registry.morph("a", "b", t, "work")?;
        let work = registry
            .get("work")
            .ok_or_else(|| anyhow::anyhow!("work map disappeared"))?;
        info!(
            "t = {:.2}: {} keys, exponent {:.2}",
            t,
            work.len(),
            work.idw_exponent()
        );
        frames.push(fill_raster(work, &config)?);
    }

    let strip = stack_horizontally(&frames, 4)?;
    save_raster_png(&strip, "colormap-morph-sequence.png")?;
    Ok(())
}

fn sunrise() -> color_map::error::Result<ColorMap> {
    let mut map = ColorMap::new().with_idw_exponent(2.0)?;
    map.add(Vec2::new(0.1, 0.1), Color8::rgb(255, 200, 80))?;
    map.add(Vec2::new(0.9, 0.2), Color8::rgb(255, 120, 40))?;
    map.add(Vec2::new(0.5, 0.9), Color8::rgb(90, 160, 255))?;
    Ok(map)
}

fn dusk() -> color_map::error::Result<ColorMap> {
    let mut map = ColorMap::new().with_idw_exponent(6.0)?;
    map.add(Vec2::new(0.5, 0.9), Color8::rgb(40, 20, 90))?;
    map.add(Vec2::new(0.2, 0.6), Color8::rgb(200, 60, 120))?;
    map.add(Vec2::new(0.8, 0.7), Color8::rgb(20, 40, 70))?;
    map.add(Vec2::new(0.6, 0.1), Color8::rgb(250, 90, 30))?;
    Ok(map)
}
